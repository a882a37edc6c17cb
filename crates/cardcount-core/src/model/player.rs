use crate::action::ActionError;
use core::borrow::Borrow;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable player name. Aliases such as "you" must be resolved before an id
/// is built from them; the tracker never rewrites ids after the fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Result<Self, ActionError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ActionError::BlankPlayer);
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ActionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PlayerId::new(value)
    }
}

impl TryFrom<&str> for PlayerId {
    type Error = ActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PlayerId::new(value)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
