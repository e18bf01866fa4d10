//! Shared utilities across axiom-build modules.

pub mod files;

pub use files::{move_file, remove_path};
