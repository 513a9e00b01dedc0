//! Shared primitives: error taxonomy, viewbox geometry and seed mixing.

/// Viewbox geometry and coordinate conversion.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
