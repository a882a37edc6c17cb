pub mod hand;
pub mod player;
pub mod resource;

pub use hand::Hand;
pub use player::PlayerId;
pub use resource::Resource;
