//! Rasterization, the render orchestrator and catalog builds.

pub mod orchestrator;
pub mod pipeline;
/// `Rasterizer` seam and the resvg backed PNG rasterizer.
pub mod raster;
