//! Facade over the workspace crates.

pub use coverage::*;
