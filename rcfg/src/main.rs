// rcfg/src/main.rs
use std::process;

use clap::Parser;
use colored::Colorize;
use rcfg_common::config::Config;
use rcfg_common::error::RcfgError;
use tracing::level_filters::LevelFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::CliArgs;

fn init_tracing(verbose_level: u8) {
    let level_filter = match verbose_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("RCFG_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();
}

fn main() {
    let cli_args = CliArgs::parse();
    init_tracing(cli_args.verbose);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    };

    match cli_args.run(config) {
        Ok(report) => {
            debug!(
                "Installed {} package(s), skipped {}",
                report.installed.len(),
                report.skipped.len()
            );
        }
        Err(RcfgError::ProjectNotSpecified) => {
            println!("RBE project is not specified");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    }
}
