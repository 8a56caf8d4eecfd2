//! CLI command implementations.

pub mod recipes;
pub mod settings;
pub mod simulate;
