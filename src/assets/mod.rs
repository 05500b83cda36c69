//! Cover art embedding and the process-wide font cache.

pub mod fonts;
pub mod resolve;
