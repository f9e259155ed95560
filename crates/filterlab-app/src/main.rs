// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FilterLab — Grayscale spatial filtering workbench
//
// Entry point. Initialises logging, resolves configuration, and dispatches the
// requested subcommand. Errors are printed in plain language with an exit code
// derived from their severity.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use filterlab_core::error::Result;
use filterlab_core::human_errors::humanize_error;

use cli::{Cli, Command};
use services::{commands, config_store, data_dir};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "FilterLab starting");

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let human = humanize_error(&e);
            eprintln!("{}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::from(human.exit_code() as u8)
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let data_dir = data_dir::data_dir();
    let config = config_store::resolve(cli.config.as_deref(), &data_dir)?;

    match cli.command {
        Command::Run(args) => commands::run(&config, &args).map(|_| ()),
        Command::Filter(args) => commands::filter(&config, &args),
        Command::Noise(args) => commands::noise(&config, &args),
        Command::Inspect { path } => commands::inspect(&path).map(|_| ()),
        Command::Config { save } => commands::show_config(&config, save.then_some(data_dir.as_path())),
    }
}
