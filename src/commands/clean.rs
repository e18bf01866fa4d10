//! Clean command - removes build artifacts.

use anyhow::Result;
use std::path::PathBuf;

use crate::common::remove_path;
use crate::paths::BuildLocations;
use crate::process::{Action, Executor, Runner};

/// Everything clean removes, in removal order.
pub fn clean_targets(locations: &BuildLocations) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("remove build output directory", locations.build_output_dir()),
        ("remove isofiles staging directory", locations.iso_files_dir.clone()),
        ("remove produced binary", locations.binary_path.clone()),
        ("remove iso", locations.iso_path.clone()),
        ("remove iso checksum", locations.checksum_path()),
    ]
}

/// Execute the clean command.
///
/// Every target is attempted even if an earlier one fails; the first failure
/// is returned afterwards. Targets that do not exist are skipped silently.
pub fn cmd_clean<E: Executor>(runner: &mut Runner<E>, locations: &BuildLocations) -> Result<()> {
    let mut first_err = None;

    for (description, path) in clean_targets(locations) {
        let description = format!("{} ({})", description, path.display());
        let result = runner.run(Some(description.as_str()), Action::cleanup(|| remove_path(&path)));
        if let Err(e) = result {
            log::warn!("{:#}", e);
            first_err.get_or_insert(e);
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
