use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WheelError;

/// Longest item text accepted, counted in characters after trimming.
pub const MAX_ITEM_CHARS: usize = 20;

/// Which item list the wheel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Reward,
    Penalty,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Reward, Mode::Penalty];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Reward => "reward",
            Mode::Penalty => "penalty",
        }
    }

    /// Heading shown above the wheel.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Reward => "Reward mode",
            Mode::Penalty => "Penalty mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reward" => Ok(Mode::Reward),
            "penalty" => Ok(Mode::Penalty),
            other => Err(format!("unknown mode '{other}' (expected reward or penalty)")),
        }
    }
}

/// A validated wheel label: trimmed, non-empty, at most [`MAX_ITEM_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Item(String);

impl Item {
    pub fn parse(text: &str) -> Result<Self, WheelError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WheelError::EmptyInput);
        }
        let len = trimmed.chars().count();
        if len > MAX_ITEM_CHARS {
            return Err(WheelError::TooLong {
                len,
                max: MAX_ITEM_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Item {
    type Error = WheelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Item::parse(&value)
    }
}

impl From<Item> for String {
    fn from(item: Item) -> Self {
        item.0
    }
}

impl PartialEq<str> for Item {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
