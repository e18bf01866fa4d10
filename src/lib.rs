//! axiom-build library exports.
//!
//! The binary in `main.rs` is a thin wrapper; everything it does is reachable
//! from here so the pipeline can be driven from integration tests.

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod grub;
pub mod paths;
pub mod process;
pub mod timing;
