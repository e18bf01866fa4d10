//! Configuration for axiom-build.
//!
//! Read from environment variables only; there is no configuration file.
//! Every setting has a default matching the standard AxiomOS layout.

use std::collections::HashMap;
use std::path::PathBuf;

/// Default name of the kernel/bootloader binary produced by cargo.
pub const DEFAULT_BINARY_NAME: &str = "axiom_os";

pub const DEFAULT_CARGO: &str = "cargo";
pub const DEFAULT_QEMU: &str = "qemu-system-x86_64";
pub const DEFAULT_GRUB_MKRESCUE: &str = "grub-mkrescue";
pub const DEFAULT_GRUB_FILE: &str = "grub-file";

/// axiom-build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Overrides the directory the tool runs from (AXIOM_TOOL_DIR).
    pub tool_dir: Option<PathBuf>,
    /// File name of the produced binary (AXIOM_BINARY).
    pub binary_name: String,
    /// Build and test toolchain (CARGO, set by cargo itself under `cargo run`).
    pub cargo: String,
    /// Emulator (AXIOM_QEMU).
    pub qemu: String,
    /// Rescue-ISO generator (AXIOM_GRUB_MKRESCUE).
    pub grub_mkrescue: String,
    /// Multiboot2 validator (AXIOM_GRUB_FILE).
    pub grub_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(std::iter::empty::<(String, String)>())
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from key/value pairs. Empty values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let get = |key: &str, default: &str| {
            env_vars
                .get(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            tool_dir: env_vars.get("AXIOM_TOOL_DIR").map(|v| PathBuf::from(v.trim())),
            binary_name: get("AXIOM_BINARY", DEFAULT_BINARY_NAME),
            cargo: get("CARGO", DEFAULT_CARGO),
            qemu: get("AXIOM_QEMU", DEFAULT_QEMU),
            grub_mkrescue: get("AXIOM_GRUB_MKRESCUE", DEFAULT_GRUB_MKRESCUE),
            grub_file: get("AXIOM_GRUB_FILE", DEFAULT_GRUB_FILE),
        }
    }

    /// Log configuration for debugging.
    pub fn log(&self) {
        log::debug!("Configuration:");
        match &self.tool_dir {
            Some(dir) => log::debug!("  AXIOM_TOOL_DIR: {}", dir.display()),
            None => log::debug!("  AXIOM_TOOL_DIR: (executable directory)"),
        }
        log::debug!("  AXIOM_BINARY: {}", self.binary_name);
        log::debug!("  CARGO: {}", self.cargo);
        log::debug!("  AXIOM_QEMU: {}", self.qemu);
        log::debug!("  AXIOM_GRUB_MKRESCUE: {}", self.grub_mkrescue);
        log::debug!("  AXIOM_GRUB_FILE: {}", self.grub_file);
    }
}
