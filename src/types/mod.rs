// Shared domain types: used by the engine, the GitHub client and the renderer.
// This module imports nothing from those layers, so the renderer only needs it.

pub mod common;
pub mod issue;
pub mod report;

pub use common::*;
pub use issue::*;
pub use report::*;
