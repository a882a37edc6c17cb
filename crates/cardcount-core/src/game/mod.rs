pub mod dice;
pub mod identity;
pub mod phase;
pub mod serialization;
pub mod session;
pub mod tracker;

pub use dice::{DiceTally, RollHeat};
pub use identity::IdentityResolver;
pub use phase::{GamePhase, PhaseTracker};
pub use serialization::TrackerSnapshot;
pub use session::{
    BuildKind, GameSession, SessionConfig, SessionError, SessionEvent, SessionOutcome,
    SessionState,
};
pub use tracker::ResourceTracker;
