//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod fit;
pub mod generate;
pub mod measure;
pub mod simulate;
