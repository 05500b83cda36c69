//! Box-model layout and vector markup emission.

/// `LayoutEngine` seam and the taffy/parley backed SVG engine.
pub mod engine;
pub(crate) mod flex;
pub(crate) mod svg;
pub(crate) mod text;
