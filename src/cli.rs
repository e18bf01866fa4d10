//! Command-line surface.
//!
//! Each flag selects one mode; they are mutually exclusive and no flag
//! means build.

use clap::{ArgGroup, Parser};
use std::fmt;

#[derive(Parser, Debug, Default)]
#[command(name = "axiom-build")]
#[command(about = "Build AxiomOS, package it as a multiboot2 ISO and boot it in QEMU")]
#[command(group(
    ArgGroup::new("mode")
        .args(["clear", "check", "makeiso", "runqemu", "test"])
        .multiple(false)
))]
#[command(
    after_help = "QUICK START:\n  axiom-build              Build the kernel\n  axiom-build --makeiso    Package it as AxiomOS.iso\n  axiom-build --check      Validate the multiboot2 header\n  axiom-build --runqemu    Boot the ISO in QEMU\n  axiom-build --clear      Remove build artifacts"
)]
pub struct Cli {
    /// Remove build output, staging tree, binary and ISO
    #[arg(short = 'c', long)]
    pub clear: bool,

    /// Check the binary is multiboot2-compliant (grub-file)
    #[arg(long)]
    pub check: bool,

    /// Stage the binary with a GRUB menu and build AxiomOS.iso
    #[arg(long)]
    pub makeiso: bool,

    /// Boot AxiomOS.iso in QEMU
    #[arg(long)]
    pub runqemu: bool,

    /// Build and run the test suite
    #[arg(short, long)]
    pub test: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Clean,
    Check,
    MakeIso,
    RunEmulator,
    Test,
    Build,
}

impl Mode {
    /// Selection order when more than one flag is set.
    pub const PRIORITY: [Mode; 6] = [
        Mode::Clean,
        Mode::Check,
        Mode::MakeIso,
        Mode::RunEmulator,
        Mode::Test,
        Mode::Build,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Clean => "clean",
            Mode::Check => "check",
            Mode::MakeIso => "makeiso",
            Mode::RunEmulator => "runqemu",
            Mode::Test => "test",
            Mode::Build => "build",
        }
    }

    fn is_set(self, cli: &Cli) -> bool {
        match self {
            Mode::Clean => cli.clear,
            Mode::Check => cli.check,
            Mode::MakeIso => cli.makeiso,
            Mode::RunEmulator => cli.runqemu,
            Mode::Test => cli.test,
            Mode::Build => true,
        }
    }

    /// The first mode in priority order whose flag is set; build otherwise.
    pub fn select(cli: &Cli) -> Mode {
        Mode::PRIORITY
            .into_iter()
            .find(|mode| mode.is_set(cli))
            .unwrap_or(Mode::Build)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::select(self)
    }
}
