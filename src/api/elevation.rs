//! JavaScript-facing elevation properties
//!
//! Wraps `VectorLayerElevationProperties` in a wasm-bindgen class with
//! camelCase accessors and XML/JSON persistence.

use wasm_bindgen::prelude::*;
use crate::api::helpers::{deserialize, js_error, serialize, string_entries};
use crate::models::{
    AltitudeBinding, AltitudeClamping, FillSymbol, LineSymbol, MarkerSymbol, ProfileSurfaceSymbology, Symbol,
    VectorLayerElevationProperties,
};
use crate::xml::{ReadWriteContext, XmlElement};
use crate::{wasm_info, wasm_log, wasm_warn};

/// Root element wrapping `<elevation>` in XML produced by `writeXml`
const LAYER_ELEMENT: &str = "maplayer";

#[wasm_bindgen(js_name = VectorLayerElevationProperties)]
pub struct JsElevationProperties {
    inner: VectorLayerElevationProperties,
}

fn as_pairs(entries: &[(String, String)]) -> Vec<(&str, &str)> {
    entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[wasm_bindgen(js_class = VectorLayerElevationProperties)]
impl JsElevationProperties {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsElevationProperties {
        Self {
            inner: VectorLayerElevationProperties::new(),
        }
    }

    #[wasm_bindgen(js_name = hasElevation)]
    pub fn has_elevation(&self) -> bool {
        self.inner.has_elevation()
    }

    #[wasm_bindgen(js_name = zScale)]
    pub fn z_scale(&self) -> f64 {
        self.inner.z_scale()
    }

    #[wasm_bindgen(js_name = setZScale)]
    pub fn set_z_scale(&mut self, scale: f64) {
        self.inner.set_z_scale(scale);
    }

    #[wasm_bindgen(js_name = zOffset)]
    pub fn z_offset(&self) -> f64 {
        self.inner.z_offset()
    }

    #[wasm_bindgen(js_name = setZOffset)]
    pub fn set_z_offset(&mut self, offset: f64) {
        self.inner.set_z_offset(offset);
    }

    pub fn clamping(&self) -> AltitudeClamping {
        self.inner.clamping()
    }

    #[wasm_bindgen(js_name = setClamping)]
    pub fn set_clamping(&mut self, clamping: AltitudeClamping) {
        self.inner.set_clamping(clamping);
    }

    pub fn binding(&self) -> AltitudeBinding {
        self.inner.binding()
    }

    #[wasm_bindgen(js_name = setBinding)]
    pub fn set_binding(&mut self, binding: AltitudeBinding) {
        self.inner.set_binding(binding);
    }

    #[wasm_bindgen(js_name = extrusionEnabled)]
    pub fn extrusion_enabled(&self) -> bool {
        self.inner.extrusion_enabled()
    }

    #[wasm_bindgen(js_name = setExtrusionEnabled)]
    pub fn set_extrusion_enabled(&mut self, enabled: bool) {
        self.inner.set_extrusion_enabled(enabled);
    }

    #[wasm_bindgen(js_name = extrusionHeight)]
    pub fn extrusion_height(&self) -> f64 {
        self.inner.extrusion_height()
    }

    #[wasm_bindgen(js_name = setExtrusionHeight)]
    pub fn set_extrusion_height(&mut self, height: f64) {
        self.inner.set_extrusion_height(height);
    }

    #[wasm_bindgen(js_name = respectLayerSymbology)]
    pub fn respect_layer_symbology(&self) -> bool {
        self.inner.respect_layer_symbology()
    }

    #[wasm_bindgen(js_name = setRespectLayerSymbology)]
    pub fn set_respect_layer_symbology(&mut self, enabled: bool) {
        self.inner.set_respect_layer_symbology(enabled);
    }

    #[wasm_bindgen(js_name = profileSymbology)]
    pub fn profile_symbology(&self) -> ProfileSurfaceSymbology {
        self.inner.profile_symbology()
    }

    #[wasm_bindgen(js_name = setProfileSymbology)]
    pub fn set_profile_symbology(&mut self, symbology: ProfileSurfaceSymbology) {
        self.inner.set_profile_symbology(symbology);
    }

    #[wasm_bindgen(js_name = showMarkerSymbolInSurfacePlots)]
    pub fn show_marker_symbol_in_surface_plots(&self) -> bool {
        self.inner.show_marker_symbol_in_surface_plots()
    }

    #[wasm_bindgen(js_name = setShowMarkerSymbolInSurfacePlots)]
    pub fn set_show_marker_symbol_in_surface_plots(&mut self, show: bool) {
        self.inner.set_show_marker_symbol_in_surface_plots(show);
    }

    /// `undefined` when no limit is set
    #[wasm_bindgen(js_name = elevationLimit)]
    pub fn elevation_limit(&self) -> Option<f64> {
        self.inner.elevation_limit()
    }

    #[wasm_bindgen(js_name = setElevationLimit)]
    pub fn set_elevation_limit(&mut self, limit: Option<f64>) {
        self.inner.set_elevation_limit(limit);
    }

    /// Replace the profile line symbol from simple properties,
    /// e.g. `{ outline_color: "#ff4433", outline_width: 0.5 }`
    #[wasm_bindgen(js_name = setProfileLineSymbol)]
    pub fn set_profile_line_symbol(&mut self, props: &js_sys::Object) -> Result<(), JsValue> {
        let entries = string_entries(props)?;
        self.inner
            .set_profile_line_symbol(LineSymbol::create_simple(&as_pairs(&entries)));
        Ok(())
    }

    #[wasm_bindgen(js_name = setProfileFillSymbol)]
    pub fn set_profile_fill_symbol(&mut self, props: &js_sys::Object) -> Result<(), JsValue> {
        let entries = string_entries(props)?;
        self.inner
            .set_profile_fill_symbol(FillSymbol::create_simple(&as_pairs(&entries)));
        Ok(())
    }

    #[wasm_bindgen(js_name = setProfileMarkerSymbol)]
    pub fn set_profile_marker_symbol(&mut self, props: &js_sys::Object) -> Result<(), JsValue> {
        let entries = string_entries(props)?;
        self.inner
            .set_profile_marker_symbol(MarkerSymbol::create_simple(&as_pairs(&entries)));
        Ok(())
    }

    #[wasm_bindgen(js_name = profileLineSymbolColor)]
    pub fn profile_line_symbol_color(&self) -> String {
        self.inner.profile_line_symbol().color().name()
    }

    #[wasm_bindgen(js_name = profileFillSymbolColor)]
    pub fn profile_fill_symbol_color(&self) -> String {
        self.inner.profile_fill_symbol().color().name()
    }

    #[wasm_bindgen(js_name = profileMarkerSymbolColor)]
    pub fn profile_marker_symbol_color(&self) -> String {
        self.inner.profile_marker_symbol().color().name()
    }

    /// Serialize to `<maplayer><elevation .../></maplayer>`
    #[wasm_bindgen(js_name = writeXml)]
    pub fn write_xml(&self) -> Result<String, JsValue> {
        let mut root = XmlElement::new(LAYER_ELEMENT);
        let mut context = ReadWriteContext::new();
        self.inner.write_xml(&mut root, &mut context);

        let xml = root
            .to_xml_string()
            .map_err(|e| js_error(format!("Elevation XML export error: {}", e)))?;
        wasm_log!("writeXml produced {} bytes", xml.len());
        Ok(xml)
    }

    /// Restore from XML containing an `<elevation>` element under the root.
    ///
    /// Returns the warnings raised while reading (empty when clean).
    #[wasm_bindgen(js_name = readXml)]
    pub fn read_xml(&mut self, xml: &str) -> Result<JsValue, JsValue> {
        let root = XmlElement::parse(xml).map_err(|e| js_error(format!("Elevation XML import error: {}", e)))?;

        let mut context = ReadWriteContext::new();
        self.inner.read_xml(&root, &mut context);

        let messages = context.take_messages();
        for message in &messages {
            wasm_warn!("readXml: {}", message);
        }
        wasm_info!("readXml completed with {} message(s)", messages.len());
        serialize(&messages, "Failed to serialize read messages")
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner, "Failed to serialize elevation properties")
    }

    #[wasm_bindgen(js_name = fromJSON)]
    pub fn from_json(value: JsValue) -> Result<JsElevationProperties, JsValue> {
        let inner = deserialize(value, "Failed to deserialize elevation properties")?;
        Ok(Self { inner })
    }
}

impl Default for JsElevationProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl JsElevationProperties {
    pub fn properties(&self) -> &VectorLayerElevationProperties {
        &self.inner
    }
}
