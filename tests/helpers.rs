//! Shared test utilities for axiom-build tests.

#![allow(dead_code)]

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

use axiom_build::config::Config;
use axiom_build::paths::BuildLocations;
use axiom_build::process::{Cmd, CommandResult, Executor, Runner};

/// Test environment with a tool directory and a separate working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Where the "companion build" leaves the binary
    pub tool_dir: PathBuf,
    /// Caller's working directory
    pub work_dir: PathBuf,
    pub locations: BuildLocations,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tool_dir = temp_dir.path().join("tool/target/debug");
        let work_dir = temp_dir.path().join("work");

        fs::create_dir_all(&tool_dir).expect("Failed to create tool dir");
        fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        let config = Config::default();
        let locations = BuildLocations::new(&tool_dir, &work_dir, &config.binary_name);

        Self {
            _temp_dir: temp_dir,
            tool_dir,
            work_dir,
            locations,
            config,
        }
    }

    /// Pretend a build produced the kernel binary.
    pub fn create_binary(&self, content: &[u8]) {
        fs::write(&self.locations.binary_path, content).expect("Failed to create binary");
    }

    /// Create every artifact clean is supposed to remove.
    pub fn create_all_artifacts(&self) {
        self.create_binary(b"\x7fELF");
        fs::create_dir_all(self.locations.build_output_dir().join("x86_64-axiom_os/debug"))
            .expect("Failed to create target dir");
        fs::create_dir_all(self.locations.grub_dir()).expect("Failed to create staging dir");
        fs::write(self.locations.grub_cfg_path(), "menu").expect("Failed to write grub.cfg");
        fs::write(&self.locations.iso_path, "iso").expect("Failed to write iso");
        fs::write(self.locations.checksum_path(), "sum").expect("Failed to write checksum");
    }

    pub fn runner(&self) -> Runner<RecordingExecutor> {
        Runner::new(RecordingExecutor::default())
    }
}

/// Executor that records commands instead of running them.
///
/// Programs exit 0 unless given a code with [`RecordingExecutor::fail`].
/// A successful `grub-mkrescue -o <iso> ...` creates the ISO file so later
/// steps see the artifact.
#[derive(Default)]
pub struct RecordingExecutor {
    pub commands: Vec<Cmd>,
    exit_codes: HashMap<String, i32>,
}

impl RecordingExecutor {
    pub fn fail(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Command lines in execution order.
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.display()).collect()
    }

    pub fn programs(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.program()).collect()
    }
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, cmd: &Cmd) -> Result<CommandResult> {
        self.commands.push(cmd.clone());
        let code = self.exit_codes.get(cmd.program()).copied().unwrap_or(0);

        if code == 0 && cmd.program() == "grub-mkrescue" {
            let args = cmd.get_args();
            if let Some(pos) = args.iter().position(|a| a == "-o") {
                fs::write(&args[pos + 1], b"CD001").expect("Failed to fake ISO");
            }
        }

        Ok(CommandResult {
            status: exit_status(code),
            stdout: String::new(),
            stderr: if code == 0 {
                String::new()
            } else {
                format!("{} exploded", cmd.program())
            },
        })
    }
}

pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// Assert that a path does not exist.
pub fn assert_absent(path: &Path) {
    assert!(
        !path.exists(),
        "Expected path to be absent: {}",
        path.display()
    );
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.is_file(), "Expected file to exist: {}", path.display());
}
