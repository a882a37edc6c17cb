use crate::action::ActionError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Resource {
    Lumber = 0,
    Brick = 1,
    Wool = 2,
    Grain = 3,
    Ore = 4,
}

impl Resource {
    pub const COUNT: usize = 5;

    pub const ALL: [Resource; Self::COUNT] = [
        Resource::Lumber,
        Resource::Brick,
        Resource::Wool,
        Resource::Grain,
        Resource::Ore,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Resource::Lumber),
            1 => Some(Resource::Brick),
            2 => Some(Resource::Wool),
            3 => Some(Resource::Grain),
            4 => Some(Resource::Ore),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Resource::Lumber => "lumber",
            Resource::Brick => "brick",
            Resource::Wool => "wool",
            Resource::Grain => "grain",
            Resource::Ore => "ore",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ActionError;

    /// Accepts the canonical names plus the common card nicknames seen in game logs.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lumber" | "wood" => Ok(Resource::Lumber),
            "brick" | "clay" => Ok(Resource::Brick),
            "wool" | "sheep" => Ok(Resource::Wool),
            "grain" | "wheat" => Ok(Resource::Grain),
            "ore" | "stone" => Ok(Resource::Ore),
            _ => Err(ActionError::UnknownResource(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Resource;

    #[test]
    fn index_roundtrip() {
        for (i, resource) in Resource::ALL.iter().enumerate() {
            assert_eq!(Resource::from_index(i), Some(*resource));
            assert_eq!(resource.index(), i);
        }
        assert_eq!(Resource::from_index(Resource::COUNT), None);
    }

    #[test]
    fn parses_names_and_nicknames() {
        assert_eq!("Ore".parse::<Resource>().unwrap(), Resource::Ore);
        assert_eq!(" wheat ".parse::<Resource>().unwrap(), Resource::Grain);
        assert_eq!("wood".parse::<Resource>().unwrap(), Resource::Lumber);
        assert!("gold".parse::<Resource>().is_err());
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(Resource::Brick.to_string(), "brick");
    }
}
