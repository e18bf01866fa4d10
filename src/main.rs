//! axiom-build - build driver for AxiomOS.
//!
//! Compiles the kernel with cargo, packages it as a GRUB multiboot2 rescue
//! ISO and boots it in QEMU. One mode runs per invocation.

use anyhow::Result;
use clap::Parser;

use axiom_build::cli::Cli;
use axiom_build::commands;
use axiom_build::config::Config;
use axiom_build::paths::BuildLocations;
use axiom_build::process::{self, Runner, SystemExecutor};
use axiom_build::timing::Timer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        process::report_error(&e);
        std::process::exit(process::exit_code(&e));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load();
    config.log();
    let locations = BuildLocations::resolve(&config)?;

    let mode = cli.mode();
    let timer = Timer::start(mode.name());
    let mut runner = Runner::new(SystemExecutor);

    commands::dispatch(mode, &mut runner, &locations, &config)?;

    timer.finish();
    Ok(())
}
