//! Small, stateless helpers shared across the core layer.

pub mod fs;
pub mod geometry;
