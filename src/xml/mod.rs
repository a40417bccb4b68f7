//! Minimal XML element tree for project persistence
//!
//! Properties write themselves into an owned `XmlElement` tree which can be
//! rendered to text with quick-xml and rebuilt from text with roxmltree.

pub mod context;
pub mod symbol;

pub use context::{ContextMessage, MessageLevel, ReadWriteContext};
pub use symbol::{load_symbol, save_symbol, SymbolXmlError};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::Document as XmlDocument;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum XmlError {
    /// Text is not well-formed XML
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Writing the element tree failed
    #[error("XML write failed: {0}")]
    Write(String),
}

pub type XmlResult<T> = Result<T, XmlError>;

/// An XML element with ordered attributes, child elements and optional text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: Option<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute, replacing any existing value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder-style `set_attribute`
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn first_child_element(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parse XML text; the document's root element is returned
    pub fn parse(xml: &str) -> XmlResult<XmlElement> {
        let doc = XmlDocument::parse(xml).map_err(|e| XmlError::InvalidXml(e.to_string()))?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node) -> XmlElement {
        let mut element = XmlElement::new(node.tag_name().name());
        for attr in node.attributes() {
            element
                .attributes
                .push((attr.name().to_string(), attr.value().to_string()));
        }

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or(""));
            }
        }
        let text = text.trim();
        if !text.is_empty() {
            element.text = Some(text.to_string());
        }

        element
    }

    /// Render the element as compact XML text
    pub fn to_xml_string(&self) -> XmlResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_to(&mut writer)?;
        into_string(writer)
    }

    /// Render the element as indented XML text
    pub fn to_xml_string_pretty(&self) -> XmlResult<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        self.write_to(&mut writer)?;
        into_string(writer)
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            write_event(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn write_event<W: std::io::Write>(writer: &mut Writer<W>, event: Event) -> XmlResult<()> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> XmlResult<String> {
    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

/// Format a float in its shortest round-trip form ("2", "0.5", "1e-7")
pub fn format_double(value: f64) -> String {
    value.to_string()
}

/// Boolean attribute text as used in project files
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Parse a boolean attribute written as `1`/`0` or `true`/`false`
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
