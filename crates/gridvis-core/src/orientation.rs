//! Y-axis orientation preference.
//!
//! `Up` follows the math convention (increasing Y moves up the screen),
//! `Down` follows the screen convention (increasing Y moves down).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way increasing Y points on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YPreference {
    /// Math convention
    #[default]
    Up,
    /// Screen convention
    Down,
}

impl YPreference {
    /// Whether rendering must negate the Y scale component.
    pub fn flips_y(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl fmt::Display for YPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for YPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "math" => Ok(Self::Up),
            "down" | "screen" => Ok(Self::Down),
            _ => Err(format!("Unknown Y-axis orientation: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_up() {
        assert_eq!(YPreference::default(), YPreference::Up);
        assert!(YPreference::Up.flips_y());
        assert!(!YPreference::Down.flips_y());
    }

    #[test]
    fn test_orientations_are_distinct() {
        assert_ne!(YPreference::Up, YPreference::Down);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("UP".parse::<YPreference>().unwrap(), YPreference::Up);
        assert_eq!("screen".parse::<YPreference>().unwrap(), YPreference::Down);
        assert!("sideways".parse::<YPreference>().is_err());
        assert_eq!(YPreference::Down.to_string(), "down");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&YPreference::Down).unwrap();
        assert_eq!(json, "\"down\"");
        let back: YPreference = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(back, YPreference::Up);
    }
}
