//! Pure composition of metadata into styled node trees, one function per card variant.

pub(crate) mod landscape;
pub mod node;
pub(crate) mod portrait;
pub mod style;
pub mod variant;
