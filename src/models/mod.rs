//! Models module for layer elevation handling
//!
//! Value types describing how a vector layer is placed in 3D and drawn in
//! elevation profiles.

pub mod altitude;
pub mod color;
pub mod elevation;
pub mod symbol;

// Re-export commonly used types
pub use altitude::{AltitudeBinding, AltitudeClamping, ProfileSurfaceSymbology};
pub use color::{Color, ColorError};
pub use elevation::VectorLayerElevationProperties;
pub use symbol::{FillSymbol, LineSymbol, MarkerShape, MarkerSymbol, Symbol, SymbolProperties, SymbolType};
