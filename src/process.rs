//! Command execution for the build pipeline.
//!
//! Every unit of work goes through [`Runner::run`], which prints an
//! `[INFO]: <description>` line and then either spawns an external command
//! through an [`Executor`] or performs a local filesystem action.
//!
//! External commands that exit non-zero become a [`CommandFailed`] error and
//! abort the calling step. Local actions propagate their errors, except that
//! cleanup actions treat a missing target as already done.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status of the command.
    pub status: ExitStatus,
    /// Captured stdout (empty for interactive commands).
    pub stdout: String,
    /// Captured stderr (empty for interactive commands).
    pub stderr: String,
}

impl CommandResult {
    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }
}

/// An external command exited unsuccessfully.
#[derive(Debug, Clone)]
pub struct CommandFailed {
    /// Message prefix, `'<program>' failed` unless overridden.
    pub prefix: String,
    /// Full command line as displayed in the `[INFO]` header.
    pub command: String,
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stderr, trimmed. Empty for interactive commands.
    pub stderr: String,
}

impl fmt::Display for CommandFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (exit code {}): {}", self.prefix, code, self.command)?,
            None => write!(f, "{} (killed by signal): {}", self.prefix, self.command)?,
        }
        if !self.stderr.is_empty() {
            write!(f, "\n{}", self.stderr)?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandFailed {}

/// Builder for configuring command execution.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    /// Inherit stdio instead of capturing output.
    interactive: bool,
    /// Custom error message prefix.
    error_prefix: Option<String>,
}

impl Cmd {
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
            interactive: false,
            error_prefix: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Add a path as an argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Let the child use the terminal directly.
    ///
    /// Use for long-running commands where the user should see progress
    /// (cargo builds) or interact with the child (QEMU).
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Set a custom error message prefix.
    pub fn error_msg(mut self, msg: impl AsRef<str>) -> Self {
        self.error_prefix = Some(msg.as_ref().to_string());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The command line as it would be typed into a shell.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Turn a finished execution into an error if it failed.
    pub fn check(&self, result: CommandResult) -> Result<CommandResult> {
        if result.success() {
            return Ok(result);
        }

        let prefix = self
            .error_prefix
            .clone()
            .unwrap_or_else(|| format!("'{}' failed", self.program));

        Err(CommandFailed {
            prefix,
            command: self.display(),
            code: result.status.code(),
            stderr: result.stderr_trimmed().to_string(),
        }
        .into())
    }

    /// Spawn the command and wait for it, without judging the exit status.
    pub fn spawn_and_wait(&self) -> Result<CommandResult> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        if self.interactive {
            cmd.stdin(Stdio::inherit());
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());

            let status = cmd.status().with_context(|| {
                format!("Failed to execute '{}'. Is it installed?", self.program)
            })?;

            return Ok(CommandResult {
                status,
                stdout: String::new(),
                stderr: String::new(),
            });
        }

        let output = cmd.output().with_context(|| {
            format!("Failed to execute '{}'. Is it installed?", self.program)
        })?;

        Ok(CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// =============================================================================
// Executor seam
// =============================================================================

/// Something that can carry out an external command.
///
/// Implementations only report what happened; judging the exit status is
/// left to [`Runner`].
pub trait Executor {
    fn execute(&mut self, cmd: &Cmd) -> Result<CommandResult>;
}

/// Spawns real processes on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&mut self, cmd: &Cmd) -> Result<CommandResult> {
        require_tool(cmd.program())?;
        cmd.spawn_and_wait()
    }
}

/// Packages that provide the host tools the pipeline shells out to.
const TOOL_PACKAGES: &[(&str, &str)] = &[
    ("cargo", "rustup"),
    ("grub-file", "grub2-common / grub-common"),
    ("grub-mkrescue", "grub2-tools-extra / grub-common (needs xorriso and mtools)"),
    ("qemu-system-x86_64", "qemu-system-x86"),
];

/// Fail early with an install hint if a program is not on PATH.
///
/// Programs given as paths are left for the spawn to judge.
fn require_tool(program: &str) -> Result<()> {
    if program.contains('/') || exists(program) {
        return Ok(());
    }
    match TOOL_PACKAGES.iter().find(|(tool, _)| *tool == program) {
        Some((_, package)) => bail!("'{}' not found in PATH. Install: {}", program, package),
        None => bail!("'{}' not found in PATH", program),
    }
}

// =============================================================================
// Runner
// =============================================================================

/// A filesystem operation performed in-process.
pub type LocalOp<'a> = Box<dyn FnOnce() -> io::Result<()> + 'a>;

/// One unit of work for [`Runner::run`].
pub enum Action<'a> {
    /// Spawn an external command.
    Command(Cmd),
    /// Perform a local operation; every error propagates.
    Local(LocalOp<'a>),
    /// Perform a local removal; a missing target counts as success.
    Cleanup(LocalOp<'a>),
}

impl<'a> Action<'a> {
    pub fn local(op: impl FnOnce() -> io::Result<()> + 'a) -> Self {
        Action::Local(Box::new(op))
    }

    pub fn cleanup(op: impl FnOnce() -> io::Result<()> + 'a) -> Self {
        Action::Cleanup(Box::new(op))
    }
}

/// Runs actions one after another, announcing each before it starts.
pub struct Runner<E = SystemExecutor> {
    executor: E,
}

impl<E: Executor> Runner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Announce and perform one action.
    ///
    /// `description` defaults to the command line for [`Action::Command`].
    /// Returns the command's result for external commands, `None` for local
    /// actions.
    pub fn run(
        &mut self,
        description: Option<&str>,
        action: Action<'_>,
    ) -> Result<Option<CommandResult>> {
        match action {
            Action::Command(cmd) => {
                let line = cmd.display();
                info(description.unwrap_or(&line));
                log::debug!("exec: {} (cwd: {:?})", line, cmd.current_dir());

                let result = self.executor.execute(&cmd)?;
                let result = cmd.check(result)?;

                if !result.stdout_trimmed().is_empty() {
                    log::debug!("{} stdout:\n{}", cmd.program(), result.stdout_trimmed());
                }
                if !result.stderr_trimmed().is_empty() {
                    log::debug!("{} stderr:\n{}", cmd.program(), result.stderr_trimmed());
                }
                Ok(Some(result))
            }
            Action::Local(op) => {
                let description = description.unwrap_or("local action");
                info(description);
                op().with_context(|| format!("{} failed", description))?;
                Ok(None)
            }
            Action::Cleanup(op) => {
                let description = description.unwrap_or("cleanup");
                info(description);
                match op() {
                    Ok(()) => Ok(None),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        log::debug!("{}: nothing to remove", description);
                        Ok(None)
                    }
                    Err(e) => Err(e).with_context(|| format!("{} failed", description)),
                }
            }
        }
    }

    /// Announce and run an external command.
    pub fn command(&mut self, cmd: Cmd) -> Result<CommandResult> {
        self.run(None, Action::Command(cmd))?
            .context("command produced no result")
    }
}

// =============================================================================
// Reporting
// =============================================================================

const INFO_TAG_COLOR: &str = "\x1b[1m\x1b[38:5:45m[INFO]\x1b[0m";
const ERROR_TAG_COLOR: &str = "\x1b[1m\x1b[91m[ERROR]\x1b[0m";

/// Format the line printed before every action.
pub fn format_info(description: &str, color: bool) -> String {
    let tag = if color { INFO_TAG_COLOR } else { "[INFO]" };
    format!("{}: {}", tag, description)
}

pub fn format_error(message: &str, color: bool) -> String {
    let tag = if color { ERROR_TAG_COLOR } else { "[ERROR]" };
    format!("{}: {}", tag, message)
}

fn info(description: &str) {
    println!("{}", format_info(description, io::stdout().is_terminal()));
}

/// Print an error chain to stderr.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{}", format_error(&format!("{:#}", err), io::stderr().is_terminal()));
}

/// Exit code for a failed run.
///
/// A failed external command passes its own exit code through; anything
/// else, including a child killed by a signal, maps to 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<CommandFailed>())
        .and_then(|failed| failed.code)
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

/// Check if a program exists in PATH.
pub fn exists(program: &str) -> bool {
    which::which(program).is_ok()
}

// =============================================================================
// Tests
// =============================================================================
