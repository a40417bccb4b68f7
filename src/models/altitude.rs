//! Altitude enumerations for vector layer elevation handling
//!
//! Each enum carries the key name used when the value is persisted to XML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

/// How a feature's elevation is anchored
#[wasm_bindgen]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeClamping {
    /// Elevation is relative to the terrain height (terrain height + z value)
    Relative = 0,

    /// Elevation is taken directly from the feature's z values
    Absolute = 1,

    /// Feature is draped on the terrain, z values are ignored
    Terrain = 2,
}

impl Default for AltitudeClamping {
    fn default() -> Self {
        AltitudeClamping::Terrain
    }
}

impl AltitudeClamping {
    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeClamping::Relative => "Relative",
            AltitudeClamping::Absolute => "Absolute",
            AltitudeClamping::Terrain => "Terrain",
        }
    }
}

impl fmt::Display for AltitudeClamping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AltitudeClamping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Relative" => Ok(AltitudeClamping::Relative),
            "Absolute" => Ok(AltitudeClamping::Absolute),
            "Terrain" => Ok(AltitudeClamping::Terrain),
            _ => Err(format!("Invalid altitude clamping: '{}'. Expected one of: Relative, Absolute, Terrain", s)),
        }
    }
}

/// Which part of a geometry is sampled against the terrain
#[wasm_bindgen]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeBinding {
    /// Every vertex is clamped separately
    Vertex = 0,

    /// The whole feature is clamped using the terrain height at its centroid
    Centroid = 1,
}

impl Default for AltitudeBinding {
    fn default() -> Self {
        AltitudeBinding::Centroid
    }
}

impl AltitudeBinding {
    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeBinding::Vertex => "Vertex",
            AltitudeBinding::Centroid => "Centroid",
        }
    }
}

impl fmt::Display for AltitudeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AltitudeBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vertex" => Ok(AltitudeBinding::Vertex),
            "Centroid" => Ok(AltitudeBinding::Centroid),
            _ => Err(format!("Invalid altitude binding: '{}'. Expected one of: Vertex, Centroid", s)),
        }
    }
}

/// How continuous surfaces are drawn in elevation profile plots
#[wasm_bindgen]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileSurfaceSymbology {
    /// Surface is drawn as a line
    Line = 0,

    /// Area below the surface is filled
    FillBelow = 1,

    /// Area above the surface is filled
    FillAbove = 2,
}

impl Default for ProfileSurfaceSymbology {
    fn default() -> Self {
        ProfileSurfaceSymbology::Line
    }
}

impl ProfileSurfaceSymbology {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSurfaceSymbology::Line => "Line",
            ProfileSurfaceSymbology::FillBelow => "FillBelow",
            ProfileSurfaceSymbology::FillAbove => "FillAbove",
        }
    }
}

impl fmt::Display for ProfileSurfaceSymbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfileSurfaceSymbology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Line" => Ok(ProfileSurfaceSymbology::Line),
            "FillBelow" => Ok(ProfileSurfaceSymbology::FillBelow),
            "FillAbove" => Ok(ProfileSurfaceSymbology::FillAbove),
            _ => Err(format!(
                "Invalid profile surface symbology: '{}'. Expected one of: Line, FillBelow, FillAbove",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(AltitudeClamping::default(), AltitudeClamping::Terrain);
        assert_eq!(AltitudeBinding::default(), AltitudeBinding::Centroid);
        assert_eq!(ProfileSurfaceSymbology::default(), ProfileSurfaceSymbology::Line);
    }

    #[test]
    fn test_keys_parse_back() {
        for clamping in [AltitudeClamping::Relative, AltitudeClamping::Absolute, AltitudeClamping::Terrain] {
            assert_eq!(clamping.as_str().parse::<AltitudeClamping>().unwrap(), clamping);
        }
        for binding in [AltitudeBinding::Vertex, AltitudeBinding::Centroid] {
            assert_eq!(binding.to_string().parse::<AltitudeBinding>().unwrap(), binding);
        }
        assert_eq!("FillAbove".parse::<ProfileSurfaceSymbology>().unwrap(), ProfileSurfaceSymbology::FillAbove);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!("terrain".parse::<AltitudeClamping>().is_err());
        assert!("".parse::<AltitudeBinding>().is_err());
        assert!("Fill".parse::<ProfileSurfaceSymbology>().is_err());
    }
}
