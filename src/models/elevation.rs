//! Elevation properties of a vector layer
//!
//! Holds how a layer's features are placed in 3D (z scale/offset, clamping,
//! binding, extrusion) and which symbols draw the layer in elevation profile
//! plots. The values are consumed by renderers; nothing here draws.

use super::altitude::{AltitudeBinding, AltitudeClamping, ProfileSurfaceSymbology};
use super::color::Color;
use super::symbol::{FillSymbol, LineSymbol, MarkerShape, MarkerSymbol, Symbol};
use crate::xml::{
    format_bool, format_double, load_symbol, parse_bool, save_symbol, ReadWriteContext, XmlElement,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the element written by `write_xml`
pub const ELEVATION_ELEMENT: &str = "elevation";

const PROFILE_LINE_SYMBOL: &str = "profileLineSymbol";
const PROFILE_FILL_SYMBOL: &str = "profileFillSymbol";
const PROFILE_MARKER_SYMBOL: &str = "profileMarkerSymbol";

/// Tolerance used when deciding whether a float still sits on its default
fn double_near(a: f64, b: f64) -> bool {
    (a - b).abs() <= 4.0 * f64::EPSILON
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorLayerElevationProperties {
    z_scale: f64,
    z_offset: f64,
    clamping: AltitudeClamping,
    binding: AltitudeBinding,
    extrusion_enabled: bool,
    extrusion_height: f64,
    respect_layer_symbology: bool,
    profile_symbology: ProfileSurfaceSymbology,
    show_marker_symbol_in_surface_plots: bool,
    elevation_limit: Option<f64>,
    profile_line_symbol: LineSymbol,
    profile_fill_symbol: FillSymbol,
    profile_marker_symbol: MarkerSymbol,
}

impl Default for VectorLayerElevationProperties {
    fn default() -> Self {
        Self {
            z_scale: 1.0,
            z_offset: 0.0,
            clamping: AltitudeClamping::default(),
            binding: AltitudeBinding::default(),
            extrusion_enabled: false,
            extrusion_height: 0.0,
            respect_layer_symbology: true,
            profile_symbology: ProfileSurfaceSymbology::default(),
            show_marker_symbol_in_surface_plots: false,
            elevation_limit: None,
            profile_line_symbol: default_profile_line_symbol(),
            profile_fill_symbol: default_profile_fill_symbol(),
            profile_marker_symbol: default_profile_marker_symbol(),
        }
    }
}

fn default_profile_line_symbol() -> LineSymbol {
    LineSymbol::new(Color::DEFAULT_STYLE, 0.6)
}

fn default_profile_fill_symbol() -> FillSymbol {
    FillSymbol::new(Color::DEFAULT_STYLE, Color::DEFAULT_STYLE.darker(150), 0.2)
}

fn default_profile_marker_symbol() -> MarkerSymbol {
    let mut marker = MarkerSymbol::new(MarkerShape::Diamond, Color::DEFAULT_STYLE, 3.0);
    marker.stroke_color = Color::DEFAULT_STYLE.darker(150);
    marker.stroke_width = 0.2;
    marker
}

impl VectorLayerElevationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the settings place features anywhere other than draped on
    /// the terrain at their original height
    pub fn has_elevation(&self) -> bool {
        self.clamping != AltitudeClamping::Terrain
            || !double_near(self.z_offset, 0.0)
            || !double_near(self.z_scale, 1.0)
            || self.extrusion_enabled
    }

    pub fn z_scale(&self) -> f64 {
        self.z_scale
    }

    pub fn set_z_scale(&mut self, scale: f64) {
        self.z_scale = scale;
    }

    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    pub fn set_z_offset(&mut self, offset: f64) {
        self.z_offset = offset;
    }

    pub fn clamping(&self) -> AltitudeClamping {
        self.clamping
    }

    pub fn set_clamping(&mut self, clamping: AltitudeClamping) {
        self.clamping = clamping;
    }

    pub fn binding(&self) -> AltitudeBinding {
        self.binding
    }

    pub fn set_binding(&mut self, binding: AltitudeBinding) {
        self.binding = binding;
    }

    pub fn extrusion_enabled(&self) -> bool {
        self.extrusion_enabled
    }

    pub fn set_extrusion_enabled(&mut self, enabled: bool) {
        self.extrusion_enabled = enabled;
    }

    pub fn extrusion_height(&self) -> f64 {
        self.extrusion_height
    }

    pub fn set_extrusion_height(&mut self, height: f64) {
        self.extrusion_height = height;
    }

    /// Whether profile plots draw features with the layer's own symbology
    pub fn respect_layer_symbology(&self) -> bool {
        self.respect_layer_symbology
    }

    pub fn set_respect_layer_symbology(&mut self, enabled: bool) {
        self.respect_layer_symbology = enabled;
    }

    pub fn profile_symbology(&self) -> ProfileSurfaceSymbology {
        self.profile_symbology
    }

    pub fn set_profile_symbology(&mut self, symbology: ProfileSurfaceSymbology) {
        self.profile_symbology = symbology;
    }

    pub fn show_marker_symbol_in_surface_plots(&self) -> bool {
        self.show_marker_symbol_in_surface_plots
    }

    pub fn set_show_marker_symbol_in_surface_plots(&mut self, show: bool) {
        self.show_marker_symbol_in_surface_plots = show;
    }

    /// Lower bound for fill-below / upper bound for fill-above surfaces
    pub fn elevation_limit(&self) -> Option<f64> {
        self.elevation_limit
    }

    pub fn set_elevation_limit(&mut self, limit: Option<f64>) {
        self.elevation_limit = limit;
    }

    pub fn profile_line_symbol(&self) -> &LineSymbol {
        &self.profile_line_symbol
    }

    pub fn set_profile_line_symbol(&mut self, symbol: LineSymbol) {
        self.profile_line_symbol = symbol;
    }

    pub fn profile_fill_symbol(&self) -> &FillSymbol {
        &self.profile_fill_symbol
    }

    pub fn set_profile_fill_symbol(&mut self, symbol: FillSymbol) {
        self.profile_fill_symbol = symbol;
    }

    pub fn profile_marker_symbol(&self) -> &MarkerSymbol {
        &self.profile_marker_symbol
    }

    pub fn set_profile_marker_symbol(&mut self, symbol: MarkerSymbol) {
        self.profile_marker_symbol = symbol;
    }

    /// Apply scale then offset to a raw z value
    pub fn transform_z(&self, z: f64) -> f64 {
        z * self.z_scale + self.z_offset
    }

    /// Transform a raw z range, keeping the result ordered when the scale is negative
    pub fn transform_z_range(&self, lower: f64, upper: f64) -> (f64, f64) {
        let a = self.transform_z(lower);
        let b = self.transform_z(upper);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    // ========================================================================
    // XML persistence
    // ========================================================================

    /// Append an `<elevation>` element describing these properties to `parent`
    pub fn write_xml(&self, parent: &mut XmlElement, context: &mut ReadWriteContext) {
        context.enter_category(ELEVATION_ELEMENT);

        let mut element = XmlElement::new(ELEVATION_ELEMENT)
            .with_attribute("zoffset", format_double(self.z_offset))
            .with_attribute("zscale", format_double(self.z_scale))
            .with_attribute("clamping", self.clamping.as_str())
            .with_attribute("binding", self.binding.as_str())
            .with_attribute("extrusionEnabled", format_bool(self.extrusion_enabled))
            .with_attribute("extrusion", format_double(self.extrusion_height))
            .with_attribute("respectLayerSymbol", format_bool(self.respect_layer_symbology))
            .with_attribute("type", self.profile_symbology.as_str())
            .with_attribute(
                "showMarkerSymbolInSurfacePlots",
                format_bool(self.show_marker_symbol_in_surface_plots),
            );
        if let Some(limit) = self.elevation_limit {
            element.set_attribute("elevationLimit", format_double(limit));
        }

        element.append_child(wrap_symbol(PROFILE_LINE_SYMBOL, &self.profile_line_symbol));
        element.append_child(wrap_symbol(PROFILE_FILL_SYMBOL, &self.profile_fill_symbol));
        element.append_child(wrap_symbol(PROFILE_MARKER_SYMBOL, &self.profile_marker_symbol));

        parent.append_child(element);
        context.leave_category();
    }

    /// Restore the properties from the `<elevation>` child of `element`.
    ///
    /// Every missing attribute or symbol falls back to its default;
    /// unparseable values also push a warning into `context`.
    pub fn read_xml(&mut self, element: &XmlElement, context: &mut ReadWriteContext) {
        let defaults = Self::default();

        let Some(elevation) = element.first_child_element(ELEVATION_ELEMENT) else {
            log::debug!("No <{}> element in <{}>, using defaults", ELEVATION_ELEMENT, element.name);
            *self = defaults;
            return;
        };

        context.enter_category(ELEVATION_ELEMENT);

        self.z_offset = read_attribute(elevation, "zoffset", defaults.z_offset, context);
        self.z_scale = read_attribute(elevation, "zscale", defaults.z_scale, context);
        self.clamping = read_attribute(elevation, "clamping", defaults.clamping, context);
        self.binding = read_attribute(elevation, "binding", defaults.binding, context);
        self.extrusion_enabled = read_bool_attribute(elevation, "extrusionEnabled", defaults.extrusion_enabled, context);
        self.extrusion_height = read_attribute(elevation, "extrusion", defaults.extrusion_height, context);
        self.respect_layer_symbology =
            read_bool_attribute(elevation, "respectLayerSymbol", defaults.respect_layer_symbology, context);
        self.profile_symbology = read_attribute(elevation, "type", defaults.profile_symbology, context);
        self.show_marker_symbol_in_surface_plots = read_bool_attribute(
            elevation,
            "showMarkerSymbolInSurfacePlots",
            defaults.show_marker_symbol_in_surface_plots,
            context,
        );
        self.elevation_limit = match elevation.attribute("elevationLimit") {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(limit) => Some(limit),
                Err(_) => {
                    context.push_warning(format!("Invalid value '{}' for attribute 'elevationLimit'", value));
                    None
                }
            },
            None => None,
        };

        self.profile_line_symbol =
            read_symbol(elevation, PROFILE_LINE_SYMBOL, defaults.profile_line_symbol, context);
        self.profile_fill_symbol =
            read_symbol(elevation, PROFILE_FILL_SYMBOL, defaults.profile_fill_symbol, context);
        self.profile_marker_symbol =
            read_symbol(elevation, PROFILE_MARKER_SYMBOL, defaults.profile_marker_symbol, context);

        context.leave_category();
    }
}

fn wrap_symbol<S: Symbol>(role: &str, symbol: &S) -> XmlElement {
    let mut wrapper = XmlElement::new(role);
    wrapper.append_child(save_symbol("", symbol));
    wrapper
}

fn read_attribute<T: FromStr>(element: &XmlElement, name: &str, default: T, context: &mut ReadWriteContext) -> T {
    match element.attribute(name) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            context.push_warning(format!("Invalid value '{}' for attribute '{}'", value, name));
            default
        }),
        None => default,
    }
}

fn read_bool_attribute(element: &XmlElement, name: &str, default: bool, context: &mut ReadWriteContext) -> bool {
    match element.attribute(name) {
        Some(value) => parse_bool(value).unwrap_or_else(|| {
            context.push_warning(format!("Invalid value '{}' for attribute '{}'", value, name));
            default
        }),
        None => default,
    }
}

fn read_symbol<S: Symbol>(element: &XmlElement, role: &str, default: S, context: &mut ReadWriteContext) -> S {
    let Some(symbol_element) = element
        .first_child_element(role)
        .and_then(|wrapper| wrapper.first_child_element("symbol"))
    else {
        return default;
    };

    context.enter_category(role);
    let symbol = load_symbol(symbol_element).unwrap_or_else(|e| {
        context.push_warning(e.to_string());
        default
    });
    context.leave_category();
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_elevation_tracks_each_trigger() {
        let mut props = VectorLayerElevationProperties::new();
        assert!(!props.has_elevation());

        props.set_z_offset(1.0);
        assert!(props.has_elevation());
        props.set_z_offset(0.0);

        props.set_z_scale(3.0);
        assert!(props.has_elevation());
        props.set_z_scale(1.0);

        props.set_clamping(AltitudeClamping::Absolute);
        assert!(props.has_elevation());
        props.set_clamping(AltitudeClamping::Terrain);

        props.set_extrusion_enabled(true);
        assert!(props.has_elevation());
        props.set_extrusion_enabled(false);

        // Binding and extrusion height alone do not move features
        props.set_binding(AltitudeBinding::Vertex);
        props.set_extrusion_height(25.0);
        assert!(!props.has_elevation());
    }

    #[test]
    fn test_has_elevation_ignores_rounding_noise() {
        let mut props = VectorLayerElevationProperties::new();
        props.set_z_offset(1e-17);
        assert!(!props.has_elevation());

        props.set_z_offset(0.0);
        props.set_z_scale(1.0 + f64::EPSILON);
        assert!(!props.has_elevation());

        props.set_z_scale(1.0 + 1e-9);
        assert!(props.has_elevation());
    }

    #[test]
    fn test_transform_z() {
        let mut props = VectorLayerElevationProperties::new();
        assert_eq!(props.transform_z(12.5), 12.5);

        props.set_z_scale(2.0);
        props.set_z_offset(0.5);
        assert_eq!(props.transform_z(10.0), 20.5);
        assert_eq!(props.transform_z_range(1.0, 3.0), (2.5, 6.5));

        props.set_z_scale(-1.0);
        assert_eq!(props.transform_z_range(1.0, 3.0), (-2.5, -0.5));
    }

    #[test]
    fn test_default_profile_symbols() {
        let props = VectorLayerElevationProperties::new();
        assert_eq!(props.profile_line_symbol().width, 0.6);
        assert_eq!(props.profile_marker_symbol().shape, MarkerShape::Diamond);
        assert_eq!(props.profile_marker_symbol().size, 3.0);
        assert_eq!(
            props.profile_fill_symbol().stroke_color,
            props.profile_fill_symbol().color.darker(150)
        );
    }

    #[test]
    fn test_write_xml_attributes() {
        let mut props = VectorLayerElevationProperties::new();
        props.set_z_scale(2.0);
        props.set_z_offset(0.5);
        props.set_elevation_limit(Some(-4.5));

        let mut parent = XmlElement::new("maplayer");
        let mut context = ReadWriteContext::new();
        props.write_xml(&mut parent, &mut context);

        let elevation = parent.first_child_element(ELEVATION_ELEMENT).unwrap();
        assert_eq!(elevation.attribute("zscale"), Some("2"));
        assert_eq!(elevation.attribute("zoffset"), Some("0.5"));
        assert_eq!(elevation.attribute("clamping"), Some("Terrain"));
        assert_eq!(elevation.attribute("binding"), Some("Centroid"));
        assert_eq!(elevation.attribute("extrusionEnabled"), Some("0"));
        assert_eq!(elevation.attribute("elevationLimit"), Some("-4.5"));
        for role in [PROFILE_LINE_SYMBOL, PROFILE_FILL_SYMBOL, PROFILE_MARKER_SYMBOL] {
            assert!(elevation.first_child_element(role).is_some(), "missing {}", role);
        }
        assert!(context.messages().is_empty());
    }

    #[test]
    fn test_read_xml_resets_missing_values() {
        let mut props = VectorLayerElevationProperties::new();
        props.set_z_scale(5.0);
        props.set_extrusion_enabled(true);
        props.set_profile_line_symbol(LineSymbol::new(Color::rgb(1, 2, 3), 1.0));

        let element = XmlElement::parse(r#"<maplayer><elevation zoffset="3"/></maplayer>"#).unwrap();
        let mut context = ReadWriteContext::new();
        props.read_xml(&element, &mut context);

        let mut expected = VectorLayerElevationProperties::new();
        expected.set_z_offset(3.0);
        assert_eq!(props, expected);
        assert!(context.messages().is_empty());
    }

    #[test]
    fn test_serde_json_round_trip() {
        let mut props = VectorLayerElevationProperties::new();
        props.set_clamping(AltitudeClamping::Absolute);
        props.set_elevation_limit(Some(12.0));
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"zScale\":1"));
        let back: VectorLayerElevationProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
