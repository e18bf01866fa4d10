//! CLI command handlers.
//!
//! Each submodule handles one mode:
//! - `build` - Build (default) and Test, delegated to cargo
//! - `check` - Validate the multiboot2 header
//! - `clean` - Remove build artifacts
//! - `iso` - Stage files and build AxiomOS.iso
//! - `run` - Boot the ISO in QEMU

pub mod build;
pub mod check;
pub mod clean;
pub mod iso;
pub mod run;

use anyhow::Result;

use crate::cli::Mode;
use crate::config::Config;
use crate::paths::BuildLocations;
use crate::process::{Executor, Runner};

pub use build::{cmd_build, cmd_test};
pub use check::cmd_check;
pub use clean::cmd_clean;
pub use iso::cmd_makeiso;
pub use run::cmd_run;

/// Run the step sequence for exactly one mode.
pub fn dispatch<E: Executor>(
    mode: Mode,
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    match mode {
        Mode::Clean => cmd_clean(runner, locations),
        Mode::Check => cmd_check(runner, locations, config),
        Mode::MakeIso => cmd_makeiso(runner, locations, config),
        Mode::RunEmulator => cmd_run(runner, locations, config),
        Mode::Test => cmd_test(runner, locations, config),
        Mode::Build => cmd_build(runner, locations, config),
    }
}
