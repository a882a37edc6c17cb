//! Observable game actions accepted by the tracker.
//!
//! - `event`: the closed `ActionEvent` set and its boundary validation.
//! - `error`: rejections raised before an action reaches the belief set.

mod error;
mod event;

pub use error::ActionError;
pub use event::ActionEvent;
