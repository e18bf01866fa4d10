//! End-to-end tests of the axiom-build binary.
//!
//! Each test runs the real executable inside a scratch working directory,
//! with every tool location pointed into that directory.

use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const AXIOM_VARS: &[&str] = &[
    "AXIOM_TOOL_DIR",
    "AXIOM_BINARY",
    "AXIOM_QEMU",
    "AXIOM_GRUB_MKRESCUE",
    "AXIOM_GRUB_FILE",
    "CARGO",
];

fn axiom_build(work_dir: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_axiom-build"));
    cmd.args(args).current_dir(work_dir).env("AXIOM_TOOL_DIR", work_dir);
    for var in AXIOM_VARS.iter().filter(|v| **v != "AXIOM_TOOL_DIR") {
        cmd.env_remove(var);
    }
    cmd.envs(vars.iter().copied());
    cmd.output().unwrap()
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
#[serial]
fn test_failing_tests_exit_with_cargo_code() {
    let temp = TempDir::new().unwrap();
    let cargo = temp.path().join("fake-cargo");
    write_script(&cargo, "exit 101");

    let output = axiom_build(temp.path(), &["-t"], &[("CARGO", cargo.to_str().unwrap())]);

    assert_eq!(output.status.code(), Some(101), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("[INFO]: "));
    assert!(stderr(&output).contains("[ERROR]: Tests failed"));
}

#[test]
#[serial]
fn test_runqemu_without_iso_exits_1() {
    let temp = TempDir::new().unwrap();

    let output = axiom_build(temp.path(), &["--runqemu"], &[("AXIOM_QEMU", "/bin/true")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("[ERROR]: ISO not found"), "stderr: {}", stderr(&output));
}

#[test]
#[serial]
fn test_two_modes_are_rejected_by_parser() {
    let temp = TempDir::new().unwrap();

    let output = axiom_build(temp.path(), &["--check", "--makeiso"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!stdout(&output).contains("[INFO]"));
    assert!(!temp.path().join("isofiles").exists());
}

#[test]
#[serial]
fn test_clean_twice_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("target/debug")).unwrap();
    fs::create_dir_all(temp.path().join("isofiles/boot/grub")).unwrap();
    fs::write(temp.path().join("AxiomOS.iso"), b"iso").unwrap();

    let first = axiom_build(temp.path(), &["-c"], &[]);
    assert_eq!(first.status.code(), Some(0), "stderr: {}", stderr(&first));
    assert!(stdout(&first).contains("[INFO]: remove build output directory"));
    assert!(!temp.path().join("target").exists());
    assert!(!temp.path().join("isofiles").exists());
    assert!(!temp.path().join("AxiomOS.iso").exists());

    let second = axiom_build(temp.path(), &["--clear"], &[]);
    assert_eq!(second.status.code(), Some(0), "stderr: {}", stderr(&second));
}
