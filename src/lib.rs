//! Layer Elevation WASM Module
//!
//! Elevation properties of GIS vector layers: z scale/offset, altitude
//! clamping and binding, extrusion, and the symbols used to draw the layer in
//! elevation profile plots, with XML persistence.

pub mod models;
pub mod xml;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use xml::{ReadWriteContext, XmlElement, XmlError};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Layer elevation WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        crate::wasm_warn!("Logger was already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
