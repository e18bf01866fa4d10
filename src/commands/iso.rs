//! Make-iso command - stages the binary and builds AxiomOS.iso.
//!
//! Staging layout (mirrors the ISO filesystem):
//!
//! ```text
//! isofiles/
//! └── boot/
//!     ├── bootloader        (moved from the tool directory)
//!     └── grub/
//!         └── grub.cfg
//! ```

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use walkdir::WalkDir;

use crate::common::move_file;
use crate::config::Config;
use crate::grub::write_grub_cfg;
use crate::paths::{BuildLocations, ISO_FILENAME};
use crate::process::{Action, Cmd, Executor, Runner};

/// Execute the make-iso command.
pub fn cmd_makeiso<E: Executor>(
    runner: &mut Runner<E>,
    locations: &BuildLocations,
    config: &Config,
) -> Result<()> {
    let binary = &locations.binary_path;
    if !binary.is_file() {
        bail!(
            "Binary not found at {}. Run a build first (axiom-build with no flags).",
            binary.display()
        );
    }

    let grub_dir = locations.grub_dir();
    let staged_binary = locations.staged_binary_path();
    let grub_cfg = locations.grub_cfg_path();

    runner.run(
        Some(format!("create {}", grub_dir.display()).as_str()),
        Action::local(|| fs::create_dir_all(&grub_dir)),
    )?;
    runner.run(
        Some(format!("move {} to {}", binary.display(), staged_binary.display()).as_str()),
        Action::local(|| move_file(binary, &staged_binary)),
    )?;
    runner.run(
        Some(format!("write {}", grub_cfg.display()).as_str()),
        Action::local(|| write_grub_cfg(&grub_cfg)),
    )?;

    println!(
        "  Staged {} files in {}",
        count_files(&locations.iso_files_dir),
        locations.iso_files_dir.display()
    );

    runner.command(
        Cmd::new(&config.grub_mkrescue)
            .arg("-o")
            .arg_path(&locations.iso_path)
            .arg_path(&locations.iso_files_dir)
            .dir(&locations.work_dir)
            .error_msg("grub-mkrescue failed to build the ISO"),
    )?;

    if !locations.iso_path.is_file() {
        bail!(
            "{} reported success but {} was not created",
            config.grub_mkrescue,
            locations.iso_path.display()
        );
    }

    let checksum_path = locations.checksum_path();
    let hash = sha256_file(&locations.iso_path)?;
    runner.run(
        Some(format!("write {}", checksum_path.display()).as_str()),
        Action::local(|| fs::write(&checksum_path, format!("{}  {}\n", hash, ISO_FILENAME))),
    )?;

    println!("ISO created: {}", locations.iso_path.display());
    Ok(())
}

/// Count regular files below `dir`.
fn count_files(dir: &Path) -> usize {
    let mut count = 0;
    for entry in WalkDir::new(dir) {
        match entry {
            Ok(e) if e.file_type().is_file() => count += 1,
            Ok(_) => {}
            Err(e) => log::warn!("Error reading staging entry: {}", e),
        }
    }
    count
}

/// Hex SHA-256 of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let f = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut r = BufReader::new(f);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = r
            .read(&mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
