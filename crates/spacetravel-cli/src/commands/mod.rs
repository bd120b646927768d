//! Command implementations.

pub mod posts;
pub mod preview;
