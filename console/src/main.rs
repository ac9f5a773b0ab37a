//! `admin-console` entry point: wires settings, adapters and the CLI.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::process::ExitCode;

use admin_console::config::ConsoleSettings;
use admin_console::domain::Error;
use admin_console::inbound::cli::{
    Cli, Outcome, OutputFormat, build_console, render, render_error,
};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(cli))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = ConsoleSettings::load_from_iter([OsString::from("admin-console")])
        .wrap_err("load CONSOLE_* settings")?;
    let console = build_console(&settings)?;

    match printed(console.execute(cli.command).await, cli.format)? {
        Printed::Stdout(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Printed::Stderr(text) => {
            eprintln!("{text}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Rendered command result and the stream it belongs on.
#[derive(Debug, PartialEq, Eq)]
enum Printed {
    Stdout(String),
    Stderr(String),
}

fn printed(
    result: Result<Outcome, Error>,
    format: OutputFormat,
) -> Result<Printed, serde_json::Error> {
    match result {
        Ok(outcome) => render(&outcome, format).map(Printed::Stdout),
        Err(error) => Ok(Printed::Stderr(render_error(&error, format))),
    }
}
