//! Layer elevation WASM API
//!
//! JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros and serialization helpers
//! - `elevation`: The `VectorLayerElevationProperties` class

pub mod helpers;
pub mod elevation;

pub use elevation::JsElevationProperties;
