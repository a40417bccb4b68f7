//! RGBA colour value used by profile symbols
//!
//! Colours are persisted as `r,g,b,a` strings and compared through their
//! `#rrggbb` name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a colour string cannot be understood
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("Invalid colour name '{0}' (expected #rgb, #rrggbb or #aarrggbb)")]
    InvalidName(String),

    #[error("Invalid encoded colour '{0}' (expected r,g,b[,a])")]
    InvalidEncoding(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Colour given to newly created default profile symbols
    pub const DEFAULT_STYLE: Color = Color::rgb(133, 182, 111);

    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex colour name: `#rgb`, `#rrggbb` or `#aarrggbb`
    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidName(name.to_string());
        let hex = name.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                // #rgb expands each digit: f -> ff
                let digits: Vec<u8> = hex
                    .chars()
                    .map(|c| channel(&c.to_string().repeat(2)))
                    .collect::<Result<_, _>>()?;
                Ok(Color::rgb(digits[0], digits[1], digits[2]))
            }
            6 => Ok(Color::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            8 => Ok(Color::rgba(
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
                channel(&hex[0..2])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb` name (alpha is not part of the name)
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Encode as `r,g,b,a` for XML properties
    pub fn encode(&self) -> String {
        format!("{},{},{},{}", self.r, self.g, self.b, self.a)
    }

    /// Decode an `r,g,b[,a]` string, falling back to a hex name
    pub fn decode(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        if value.starts_with('#') {
            return Color::from_name(value);
        }

        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(ColorError::InvalidEncoding(value.to_string()));
        }
        let channels = parts
            .iter()
            .map(|p| p.parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| ColorError::InvalidEncoding(value.to_string()))?;

        Ok(Color::rgba(
            channels[0],
            channels[1],
            channels[2],
            channels.get(3).copied().unwrap_or(255),
        ))
    }

    /// Darker variant: channels divided by `factor / 100` (150 gives two thirds)
    pub fn darker(&self, factor: u32) -> Self {
        if factor <= 100 {
            return *self;
        }
        let scale = |c: u8| ((c as u32 * 100) / factor) as u8;
        Color::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT_STYLE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::decode(s)
    }
}

// Serialized through the encoded form so alpha survives JSON round-trips
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Color::from_name("#ff4433").unwrap(), Color::rgb(255, 68, 51));
        assert_eq!(Color::from_name("#FF4433").unwrap(), Color::rgb(255, 68, 51));
        assert_eq!(Color::from_name("#f43").unwrap(), Color::rgb(255, 68, 51));
        assert_eq!(Color::from_name("#80ff4433").unwrap(), Color::rgba(255, 68, 51, 128));
    }

    #[test]
    fn test_from_name_invalid() {
        assert!(Color::from_name("ff4433").is_err());
        assert!(Color::from_name("#ff44").is_err());
        assert!(Color::from_name("#gg4433").is_err());
        assert!(Color::from_name("#ff4433ΩΩ").is_err());
    }

    #[test]
    fn test_name_is_lowercase_rgb() {
        assert_eq!(Color::rgba(255, 68, 85, 10).name(), "#ff4455");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_encode_decode() {
        let color = Color::rgba(255, 17, 34, 200);
        assert_eq!(color.encode(), "255,17,34,200");
        assert_eq!(Color::decode("255,17,34,200").unwrap(), color);
        assert_eq!(Color::decode(" 255, 17 ,34 ").unwrap(), Color::rgb(255, 17, 34));
        assert_eq!(Color::decode("#ff1122").unwrap(), Color::rgb(255, 17, 34));
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(Color::decode("255,17"), Err(ColorError::InvalidEncoding(_))));
        assert!(matches!(Color::decode("300,0,0"), Err(ColorError::InvalidEncoding(_))));
        assert!(matches!(Color::decode("red"), Err(ColorError::InvalidEncoding(_))));
    }

    #[test]
    fn test_darker() {
        assert_eq!(Color::rgb(150, 30, 0).darker(150), Color::rgb(100, 20, 0));
        assert_eq!(Color::rgb(150, 30, 0).darker(100), Color::rgb(150, 30, 0));
    }

    #[test]
    fn test_serde_keeps_alpha() {
        let color = Color::rgba(1, 2, 3, 4);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"1,2,3,4\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
