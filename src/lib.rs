//! Numerate (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the app shell
//! (`app`) and settings (`config`) used by the binary.

pub mod app;
pub mod config;

pub use numerate_core as core;
pub use numerate_input as input;
pub use numerate_scores as scores;
pub use numerate_term as term;
pub use numerate_types as types;
