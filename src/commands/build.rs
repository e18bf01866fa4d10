//! Build and test commands - delegate to cargo.

use anyhow::Result;

use crate::config::Config;
use crate::paths::BuildLocations;
use crate::process::{Cmd, Executor, Runner};

/// Execute the build command (the default mode).
pub fn cmd_build<E: Executor>(
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    runner.command(
        Cmd::new(&config.cargo)
            .arg("build")
            .dir(&locations.work_dir)
            .interactive()
            .error_msg("Build failed"),
    )?;

    if !locations.binary_path.is_file() {
        log::warn!(
            "build finished but {} does not exist; make-iso will not find it",
            locations.binary_path.display()
        );
    }
    Ok(())
}

/// Execute the test command.
pub fn cmd_test<E: Executor>(
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    runner.command(
        Cmd::new(&config.cargo)
            .arg("test")
            .dir(&locations.work_dir)
            .interactive()
            .error_msg("Tests failed"),
    )?;
    Ok(())
}
