//! Generic symbol XML format
//!
//! ```xml
//! <symbol type="line" name="" alpha="1" clip_to_extent="1">
//!   <layer class="SimpleLine" enabled="1" locked="0" pass="0">
//!     <prop k="line_color" v="255,68,51,255"/>
//!     <prop k="line_width" v="0.5"/>
//!   </layer>
//! </symbol>
//! ```
//!
//! Layer properties written as an `<Option type="Map">` block of
//! `<Option name=".." value=".."/>` entries are read as well.

use super::{format_double, XmlElement};
use crate::models::symbol::{Symbol, SymbolProperties, SymbolType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolXmlError {
    #[error("Expected <symbol> element, found <{0}>")]
    NotASymbol(String),

    #[error("Symbol type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch { expected: SymbolType, found: String },

    #[error("Symbol has no <layer> element")]
    MissingLayer,

    #[error("Unsupported symbol layer class '{found}' (expected '{expected}')")]
    UnsupportedLayerClass { expected: &'static str, found: String },
}

/// Write a symbol as a `<symbol>` element
pub fn save_symbol<S: Symbol>(name: &str, symbol: &S) -> XmlElement {
    let mut layer = XmlElement::new("layer")
        .with_attribute("class", S::LAYER_CLASS)
        .with_attribute("enabled", "1")
        .with_attribute("locked", "0")
        .with_attribute("pass", "0");

    for (key, value) in symbol.layer_properties() {
        layer.append_child(
            XmlElement::new("prop")
                .with_attribute("k", key)
                .with_attribute("v", value),
        );
    }

    let mut element = XmlElement::new("symbol")
        .with_attribute("type", S::SYMBOL_TYPE.as_str())
        .with_attribute("name", name)
        .with_attribute("alpha", format_double(symbol.opacity()))
        .with_attribute("clip_to_extent", "1");
    element.append_child(layer);
    element
}

/// Rebuild a symbol from a `<symbol>` element
pub fn load_symbol<S: Symbol>(element: &XmlElement) -> Result<S, SymbolXmlError> {
    if element.name != "symbol" {
        return Err(SymbolXmlError::NotASymbol(element.name.clone()));
    }

    let found = element.attribute("type").unwrap_or("");
    if found != S::SYMBOL_TYPE.as_str() {
        return Err(SymbolXmlError::TypeMismatch {
            expected: S::SYMBOL_TYPE,
            found: found.to_string(),
        });
    }

    let layer = element
        .first_child_element("layer")
        .ok_or(SymbolXmlError::MissingLayer)?;
    let class = layer.attribute("class").unwrap_or("");
    if class != S::LAYER_CLASS {
        return Err(SymbolXmlError::UnsupportedLayerClass {
            expected: S::LAYER_CLASS,
            found: class.to_string(),
        });
    }

    let mut symbol = S::from_layer_properties(&read_layer_properties(layer));

    let opacity = element
        .attribute("alpha")
        .and_then(|a| a.trim().parse::<f64>().ok())
        .unwrap_or(1.0);
    symbol.set_opacity(opacity);

    Ok(symbol)
}

fn read_layer_properties(layer: &XmlElement) -> SymbolProperties {
    let mut props = SymbolProperties::new();

    for prop in layer.child_elements("prop") {
        if let (Some(k), Some(v)) = (prop.attribute("k"), prop.attribute("v")) {
            props.insert(k.to_string(), v.to_string());
        }
    }

    if let Some(map) = layer.first_child_element("Option") {
        for option in map.child_elements("Option") {
            if let (Some(k), Some(v)) = (option.attribute("name"), option.attribute("value")) {
                props.entry(k.to_string()).or_insert_with(|| v.to_string());
            }
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Color;
    use crate::models::symbol::{FillSymbol, LineSymbol, MarkerShape, MarkerSymbol};

    #[test]
    fn test_save_symbol_layout() {
        let sym = LineSymbol::create_simple(&[("outline_color", "#ff4433"), ("outline_width", "0.5")]);
        let elem = save_symbol("", &sym);
        assert_eq!(elem.name, "symbol");
        assert_eq!(elem.attribute("type"), Some("line"));
        assert_eq!(elem.attribute("alpha"), Some("1"));

        let layer = elem.first_child_element("layer").unwrap();
        assert_eq!(layer.attribute("class"), Some("SimpleLine"));
        let color = layer
            .child_elements("prop")
            .find(|p| p.attribute("k") == Some("line_color"))
            .and_then(|p| p.attribute("v"));
        assert_eq!(color, Some("255,68,51,255"));
    }

    #[test]
    fn test_load_saved_marker() {
        let mut sym = MarkerSymbol::new(MarkerShape::Star, Color::rgb(255, 17, 34), 3.5);
        sym.opacity = 0.25;
        let loaded: MarkerSymbol = load_symbol(&save_symbol("", &sym)).unwrap();
        assert_eq!(loaded, sym);
    }

    #[test]
    fn test_load_rejects_wrong_type() {
        let elem = save_symbol("", &FillSymbol::default());
        let err = load_symbol::<LineSymbol>(&elem).unwrap_err();
        assert_eq!(
            err,
            SymbolXmlError::TypeMismatch {
                expected: SymbolType::Line,
                found: "fill".to_string()
            }
        );
    }

    #[test]
    fn test_load_rejects_missing_layer() {
        let elem = XmlElement::new("symbol").with_attribute("type", "marker");
        assert_eq!(load_symbol::<MarkerSymbol>(&elem).unwrap_err(), SymbolXmlError::MissingLayer);
    }

    #[test]
    fn test_load_rejects_other_element() {
        let elem = XmlElement::new("layer");
        assert!(matches!(load_symbol::<FillSymbol>(&elem), Err(SymbolXmlError::NotASymbol(_))));
    }

    #[test]
    fn test_load_option_map_layout() {
        let xml = r#"<symbol type="fill" name="" alpha="0.5">
            <layer class="SimpleFill">
              <Option type="Map">
                <Option name="color" type="QString" value="255,68,85,255"/>
                <Option name="outline_width" type="QString" value="0.4"/>
              </Option>
            </layer>
          </symbol>"#;
        let elem = XmlElement::parse(xml).unwrap();
        let sym: FillSymbol = load_symbol(&elem).unwrap();
        assert_eq!(sym.color.name(), "#ff4455");
        assert_eq!(sym.stroke_width, 0.4);
        assert_eq!(sym.opacity, 0.5);
    }
}
