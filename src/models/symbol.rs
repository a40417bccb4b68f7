//! Simple profile symbols
//!
//! Each symbol holds a single "simple" symbol layer: a solid line, a solid fill
//! with an outline, or a shaped marker. Symbols are built from string property
//! maps (`create_simple`) and expose the same maps for XML persistence.

use super::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Property map of a symbol layer (`key -> value`)
pub type SymbolProperties = BTreeMap<String, String>;

/// Geometry family a symbol renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Line,
    Fill,
    Marker,
}

impl SymbolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolType::Line => "line",
            SymbolType::Fill => "fill",
            SymbolType::Marker => "marker",
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SymbolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(SymbolType::Line),
            "fill" => Ok(SymbolType::Fill),
            "marker" => Ok(SymbolType::Marker),
            _ => Err(format!("Invalid symbol type: '{}'. Expected one of: line, fill, marker", s)),
        }
    }
}

/// Common behaviour of the profile symbols
pub trait Symbol: Clone + fmt::Debug + Sized {
    /// Symbol family, persisted as the `type` attribute
    const SYMBOL_TYPE: SymbolType;

    /// Class name of the single symbol layer
    const LAYER_CLASS: &'static str;

    /// Main colour (line colour for lines, fill colour otherwise)
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    fn opacity(&self) -> f64;

    fn set_opacity(&mut self, opacity: f64);

    /// Properties of the symbol layer, using canonical keys
    fn layer_properties(&self) -> SymbolProperties;

    /// Build a symbol from layer properties. Unknown keys are ignored and
    /// unparseable values keep their defaults.
    fn from_layer_properties(props: &SymbolProperties) -> Self;

    /// Build a symbol from `(key, value)` pairs, accepting the usual key aliases
    fn create_simple(props: &[(&str, &str)]) -> Self {
        let props: SymbolProperties = props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::from_layer_properties(&props)
    }
}

/// Marker shapes supported by the simple marker layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
    Star,
}

impl MarkerShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerShape::Circle => "circle",
            MarkerShape::Square => "square",
            MarkerShape::Diamond => "diamond",
            MarkerShape::Triangle => "triangle",
            MarkerShape::Cross => "cross",
            MarkerShape::Star => "star",
        }
    }
}

impl FromStr for MarkerShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" => Ok(MarkerShape::Circle),
            "square" | "rectangle" => Ok(MarkerShape::Square),
            "diamond" => Ok(MarkerShape::Diamond),
            "triangle" => Ok(MarkerShape::Triangle),
            "cross" => Ok(MarkerShape::Cross),
            "star" => Ok(MarkerShape::Star),
            _ => Err(format!("Invalid marker shape: '{}'", s)),
        }
    }
}

// ============================================================================
// Property helpers
// ============================================================================

fn first_value<'a>(props: &'a SymbolProperties, keys: &[&str]) -> Option<(&'a str, &'a str)> {
    keys.iter()
        .find_map(|key| props.get_key_value(*key))
        .map(|(k, v)| (k.as_str(), v.as_str()))
}

fn read_color(props: &SymbolProperties, keys: &[&str], default: Color) -> Color {
    match first_value(props, keys) {
        Some((key, value)) => Color::decode(value).unwrap_or_else(|e| {
            log::warn!("Ignoring symbol property '{}': {}", key, e);
            default
        }),
        None => default,
    }
}

fn read_parsed<T: FromStr>(props: &SymbolProperties, keys: &[&str], default: T) -> T {
    match first_value(props, keys) {
        Some((key, value)) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring symbol property '{}': unparseable value '{}'", key, value);
            default
        }),
        None => default,
    }
}

const COLOR_KEYS: &[&str] = &["color", "fill_color"];
const STROKE_COLOR_KEYS: &[&str] = &["outline_color", "line_color"];
const STROKE_WIDTH_KEYS: &[&str] = &["outline_width", "line_width"];

// ============================================================================
// Line
// ============================================================================

/// Solid line symbol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSymbol {
    pub opacity: f64,
    pub color: Color,
    /// Width in millimetres
    pub width: f64,
}

impl Default for LineSymbol {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            color: Color::DEFAULT_STYLE,
            width: 0.26,
        }
    }
}

impl LineSymbol {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }
}

impl Symbol for LineSymbol {
    const SYMBOL_TYPE: SymbolType = SymbolType::Line;
    const LAYER_CLASS: &'static str = "SimpleLine";

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn layer_properties(&self) -> SymbolProperties {
        let mut props = SymbolProperties::new();
        props.insert("line_color".into(), self.color.encode());
        props.insert("line_width".into(), self.width.to_string());
        props
    }

    fn from_layer_properties(props: &SymbolProperties) -> Self {
        let default = Self::default();
        Self {
            opacity: default.opacity,
            color: read_color(props, &["line_color", "outline_color", "color"], default.color),
            width: read_parsed(props, &["line_width", "outline_width", "width"], default.width),
        }
    }
}

// ============================================================================
// Fill
// ============================================================================

/// Solid fill symbol with an outline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillSymbol {
    pub opacity: f64,
    pub color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for FillSymbol {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            color: Color::DEFAULT_STYLE,
            stroke_color: Color::rgb(35, 35, 35),
            stroke_width: 0.26,
        }
    }
}

impl FillSymbol {
    pub fn new(color: Color, stroke_color: Color, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_color,
            stroke_width,
            ..Default::default()
        }
    }
}

impl Symbol for FillSymbol {
    const SYMBOL_TYPE: SymbolType = SymbolType::Fill;
    const LAYER_CLASS: &'static str = "SimpleFill";

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn layer_properties(&self) -> SymbolProperties {
        let mut props = SymbolProperties::new();
        props.insert("color".into(), self.color.encode());
        props.insert("outline_color".into(), self.stroke_color.encode());
        props.insert("outline_width".into(), self.stroke_width.to_string());
        props.insert("style".into(), "solid".into());
        props
    }

    fn from_layer_properties(props: &SymbolProperties) -> Self {
        let default = Self::default();
        Self {
            opacity: default.opacity,
            color: read_color(props, COLOR_KEYS, default.color),
            stroke_color: read_color(props, STROKE_COLOR_KEYS, default.stroke_color),
            stroke_width: read_parsed(props, STROKE_WIDTH_KEYS, default.stroke_width),
        }
    }
}

// ============================================================================
// Marker
// ============================================================================

/// Shaped marker symbol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub opacity: f64,
    pub color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    /// Diameter in millimetres
    pub size: f64,
    pub shape: MarkerShape,
}

impl Default for MarkerSymbol {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            color: Color::DEFAULT_STYLE,
            stroke_color: Color::rgb(35, 35, 35),
            stroke_width: 0.0,
            size: 2.0,
            shape: MarkerShape::Circle,
        }
    }
}

impl MarkerSymbol {
    pub fn new(shape: MarkerShape, color: Color, size: f64) -> Self {
        Self {
            shape,
            color,
            size,
            ..Default::default()
        }
    }
}

impl Symbol for MarkerSymbol {
    const SYMBOL_TYPE: SymbolType = SymbolType::Marker;
    const LAYER_CLASS: &'static str = "SimpleMarker";

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn layer_properties(&self) -> SymbolProperties {
        let mut props = SymbolProperties::new();
        props.insert("color".into(), self.color.encode());
        props.insert("outline_color".into(), self.stroke_color.encode());
        props.insert("outline_width".into(), self.stroke_width.to_string());
        props.insert("size".into(), self.size.to_string());
        props.insert("name".into(), self.shape.as_str().into());
        props
    }

    fn from_layer_properties(props: &SymbolProperties) -> Self {
        let default = Self::default();
        Self {
            opacity: default.opacity,
            color: read_color(props, COLOR_KEYS, default.color),
            stroke_color: read_color(props, STROKE_COLOR_KEYS, default.stroke_color),
            stroke_width: read_parsed(props, STROKE_WIDTH_KEYS, default.stroke_width),
            size: read_parsed(props, &["size"], default.size),
            shape: read_parsed(props, &["name"], default.shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_create_simple_outline_alias() {
        let sym = LineSymbol::create_simple(&[("outline_color", "#ff4433"), ("outline_width", "0.5")]);
        assert_eq!(sym.color().name(), "#ff4433");
        assert_eq!(sym.width, 0.5);
    }

    #[test]
    fn test_line_canonical_key_wins_over_alias() {
        let sym = LineSymbol::create_simple(&[("line_color", "#000001"), ("color", "#000002")]);
        assert_eq!(sym.color, Color::rgb(0, 0, 1));
    }

    #[test]
    fn test_fill_create_simple() {
        let sym = FillSymbol::create_simple(&[("color", "#ff4455"), ("outline_width", "0.5")]);
        assert_eq!(sym.color().name(), "#ff4455");
        assert_eq!(sym.stroke_width, 0.5);
        assert_eq!(sym.stroke_color, FillSymbol::default().stroke_color);
    }

    #[test]
    fn test_marker_create_simple() {
        let sym = MarkerSymbol::create_simple(&[
            ("color", "#ff1122"),
            ("outline_width", "0.5"),
            ("name", "Diamond"),
            ("size", "4"),
        ]);
        assert_eq!(sym.color().name(), "#ff1122");
        assert_eq!(sym.shape, MarkerShape::Diamond);
        assert_eq!(sym.size, 4.0);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let sym = MarkerSymbol::create_simple(&[("color", "nope"), ("size", "big"), ("name", "blob")]);
        assert_eq!(sym, MarkerSymbol::default());
    }

    #[test]
    fn test_layer_properties_rebuild_same_symbol() {
        let mut sym = FillSymbol::new(Color::rgba(10, 20, 30, 40), Color::rgb(1, 2, 3), 0.75);
        sym.set_opacity(1.0);
        let rebuilt = FillSymbol::from_layer_properties(&sym.layer_properties());
        assert_eq!(rebuilt, sym);
    }

    #[test]
    fn test_symbol_type_keys() {
        assert_eq!(LineSymbol::SYMBOL_TYPE.as_str(), "line");
        assert_eq!("marker".parse::<SymbolType>().unwrap(), SymbolType::Marker);
        assert!("Marker".parse::<SymbolType>().is_err());
    }
}
