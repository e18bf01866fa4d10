//! Locations of every file the pipeline reads or writes.
//!
//! Two roots are resolved once per run:
//! - the tool directory, where the companion cargo build leaves the
//!   kernel/bootloader binary next to this executable
//! - the working directory, where staging files and the ISO are produced
//!
//! Everything else is joined onto one of them, so the steps only ever see
//! absolute paths.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Output ISO file name.
pub const ISO_FILENAME: &str = "AxiomOS.iso";
/// Suffix of the checksum written next to the ISO.
pub const ISO_CHECKSUM_SUFFIX: &str = ".sha256";
/// Staging tree mirroring the ISO filesystem.
pub const ISO_FILES_DIR: &str = "isofiles";
/// Name of the binary inside the staging tree, as referenced by grub.cfg.
pub const STAGED_BINARY_NAME: &str = "bootloader";
/// Cargo build output directory, relative to the working directory.
pub const BUILD_OUTPUT_DIR: &str = "target";

/// Absolute paths used by the pipeline steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLocations {
    pub tool_dir: PathBuf,
    pub work_dir: PathBuf,
    /// `tool_dir/<binary name>`
    pub binary_path: PathBuf,
    /// `work_dir/isofiles`
    pub iso_files_dir: PathBuf,
    /// `work_dir/AxiomOS.iso`
    pub iso_path: PathBuf,
}

impl BuildLocations {
    /// Derive all locations from the two roots.
    ///
    /// Relative roots are taken as relative to `work_dir`, which itself must
    /// be absolute.
    pub fn new(tool_dir: &Path, work_dir: &Path, binary_name: &str) -> Self {
        let tool_dir = if tool_dir.is_absolute() {
            tool_dir.to_path_buf()
        } else {
            work_dir.join(tool_dir)
        };

        Self {
            binary_path: tool_dir.join(binary_name),
            iso_files_dir: work_dir.join(ISO_FILES_DIR),
            iso_path: work_dir.join(ISO_FILENAME),
            tool_dir,
            work_dir: work_dir.to_path_buf(),
        }
    }

    /// Resolve from the running executable and the current directory.
    pub fn resolve(config: &Config) -> Result<Self> {
        let work_dir =
            std::env::current_dir().context("Failed to determine the current directory")?;

        let tool_dir = match &config.tool_dir {
            Some(dir) => dir.clone(),
            None => {
                let exe = std::env::current_exe()
                    .context("Failed to determine the location of this executable")?;
                exe.parent()
                    .with_context(|| format!("Executable has no parent: {}", exe.display()))?
                    .to_path_buf()
            }
        };

        let locations = Self::new(&tool_dir, &work_dir, &config.binary_name);
        log::debug!("{:#?}", locations);
        Ok(locations)
    }

    /// Cargo's output directory, removed by clean.
    pub fn build_output_dir(&self) -> PathBuf {
        self.work_dir.join(BUILD_OUTPUT_DIR)
    }

    /// `isofiles/boot/grub`
    pub fn grub_dir(&self) -> PathBuf {
        self.iso_files_dir.join("boot/grub")
    }

    /// `isofiles/boot/grub/grub.cfg`
    pub fn grub_cfg_path(&self) -> PathBuf {
        self.grub_dir().join("grub.cfg")
    }

    /// `isofiles/boot/bootloader`, where make-iso moves the binary.
    pub fn staged_binary_path(&self) -> PathBuf {
        self.iso_files_dir.join("boot").join(STAGED_BINARY_NAME)
    }

    /// `AxiomOS.iso.sha256`
    pub fn checksum_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}{}", ISO_FILENAME, ISO_CHECKSUM_SUFFIX))
    }
}
