//! launchd-activate - reconcile launchd services with a directory of definitions
//!
//! Usage: launchd-activate [--system | --user | --user-all] [--copy | --symlink]
//!                         [-n] [--timeout SECS] NEW [OLD]
//!
//! Exits with the number of operations that failed (0 on success, at most
//! 255), or 1 when nothing could be attempted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use launchd_activate::config::Config;
use launchd_activate::infrastructure::logging;
use launchd_activate::presentation::{factory, output, Cli, OutputMode};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::level_for(cli.quiet, cli.verbose)) {
        eprintln!("warning: logging unavailable: {}", e);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let (config, warnings) =
        Config::resolve(cli.config.as_deref()).context("failed to load configuration")?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let options = factory::activate_options(&cli, &config)?;

    let color = output::use_color(cli.color.map(Into::into).unwrap_or(config.output.color));
    let mode = OutputMode::select(
        cli.json || config.output.json,
        cli.quiet,
        color,
        cli.verbose > 0,
    );
    let use_case = factory::create_activate_use_case(mode.event_sink());

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("cannot install Ctrl-C handler: {}", e);
    }

    let plan = use_case.plan(&options)?;
    if mode.prints_plan() {
        print!("{}", plan);
    }

    let report = use_case.apply(&plan, &options, Some(&*interrupted));
    Ok(report.exit_code())
}
