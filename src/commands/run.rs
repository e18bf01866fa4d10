//! Run command - boots the ISO in QEMU.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::paths::BuildLocations;
use crate::process::{Cmd, Executor, Runner};

/// Execute the run command. Blocks until QEMU exits.
pub fn cmd_run<E: Executor>(
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    if !locations.iso_path.is_file() {
        bail!(
            "ISO not found at {}. Run 'axiom-build --makeiso' first.",
            locations.iso_path.display()
        );
    }

    runner.command(
        Cmd::new(&config.qemu)
            .arg("-cdrom")
            .arg_path(&locations.iso_path)
            .dir(&locations.work_dir)
            .interactive()
            .error_msg("QEMU exited with an error"),
    )?;

    Ok(())
}
