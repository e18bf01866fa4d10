//! Check command - validates the multiboot2 header with grub-file.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::paths::BuildLocations;
use crate::process::{Cmd, Executor, Runner};

/// The binary to validate: the fresh build output if present, otherwise the
/// copy already staged by make-iso.
pub fn check_target(locations: &BuildLocations) -> Option<PathBuf> {
    [locations.binary_path.clone(), locations.staged_binary_path()]
        .into_iter()
        .find(|p| p.is_file())
}

/// Execute the check command.
pub fn cmd_check<E: Executor>(
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    let Some(binary) = check_target(locations) else {
        bail!(
            "No binary to check: neither {} nor {} exists. Run a build first.",
            locations.binary_path.display(),
            locations.staged_binary_path().display()
        );
    };

    runner.command(
        Cmd::new(&config.grub_file)
            .arg("--is-x86-multiboot2")
            .arg_path(&binary)
            .error_msg(format!("{} is not multiboot2-compliant", binary.display())),
    )?;

    println!("{} is multiboot2-compliant.", binary.display());
    Ok(())
}
