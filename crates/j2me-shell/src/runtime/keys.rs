//! Logical key events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys of a feature-phone keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Centre of the directional pad (fire/select).
    Center,
    SoftLeft,
    SoftRight,
    /// Numeric key `0`..=`9`.
    Digit(u8),
    Star,
    Pound,
    Call,
    End,
}

impl Key {
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Self::Up | Self::Down | Self::Left | Self::Right | Self::Center
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Center => f.write_str("center"),
            Self::SoftLeft => f.write_str("softLeft"),
            Self::SoftRight => f.write_str("softRight"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::Star => f.write_str("*"),
            Self::Pound => f.write_str("#"),
            Self::Call => f.write_str("call"),
            Self::End => f.write_str("end"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Parse the keypad labels used by the UI layer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "center" => Self::Center,
            "softLeft" => Self::SoftLeft,
            "softRight" => Self::SoftRight,
            "*" => Self::Star,
            "#" => Self::Pound,
            "call" => Self::Call,
            "end" => Self::End,
            digit if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
                Self::Digit(digit.as_bytes()[0] - b'0')
            }
            other => return Err(format!("unknown key '{other}'")),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_labels() {
        assert_eq!("softLeft".parse::<Key>().unwrap(), Key::SoftLeft);
        assert_eq!("7".parse::<Key>().unwrap(), Key::Digit(7));
        assert_eq!("#".parse::<Key>().unwrap(), Key::Pound);
        assert!("77".parse::<Key>().is_err());
        assert!("menu".parse::<Key>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for key in [Key::Up, Key::Center, Key::SoftRight, Key::Digit(0), Key::Star, Key::End] {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
    }

    #[test]
    fn directional() {
        assert!(Key::Center.is_directional());
        assert!(!Key::Digit(2).is_directional());
    }
}
