//! Song metadata and the content catalog cards are generated for.

pub mod model;
pub mod store;
