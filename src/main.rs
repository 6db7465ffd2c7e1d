#![allow(
    clippy::collapsible_else_if,
    clippy::collapsible_if,
    clippy::useless_format
)]
#![deny(
    clippy::get_unwrap,
    clippy::panic,
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::use_debug,
    clippy::used_underscore_binding,
    clippy::used_underscore_items
)]

mod actions;
mod config;
mod environment;
mod logger;
mod prompt;
mod types;
mod util;

use anyhow::{Context, Result, anyhow};
use clap::CommandFactory;
use clap::Parser;
use clap_complete::CompleteEnv;
use config::{cli, resolve_config};
use log::Log;
use prompt::Prompter;
use std::io::{self, Write};
use std::time::Duration;
use util::{print_json_output, set_should_print_output};

pub fn main() -> Result<()> {
    let logger = logger::WizardLogger::new(log::LevelFilter::Trace)
        .init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    // This function will not return if there is tab completion requested.
    if std::env::var("COMPLETE").is_ok() {
        CompleteEnv::with_factory(cli::Args::command).complete();
        return Ok(());
    }

    let cli: cli::Args = cli::Args::parse();

    if let Some(log_level) = cli.log_level {
        logger.set_level(log_level);
    } else {
        logger.set_level(log::LevelFilter::Info);
    };

    let config = resolve_config(&cli).context("Resolving config")?;

    // Now that we've loaded the config, we can set the log level and print out any deferred messages
    // emitted while we were loading the config.
    logger.set_level(config.log_level);
    logger.print_deferred();

    set_should_print_output(!cli.json);

    if cli.show_config {
        actions::show_config(&config);
        if cli.json {
            print_json_output()?;
        }
        logger.flush();
        return Ok(());
    }

    let paths = if cli.paths.is_empty() {
        // With --json, stdout is reserved for the JSON document
        let prompt_output: Box<dyn Write> = if cli.json {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        let stdin = io::stdin();
        let mut prompter = Prompter::new(
            stdin.lock(),
            prompt_output,
            Duration::from_millis(config.retry_delay_ms),
        );
        prompter.greet()?;
        let count = prompter.read_count()?;
        prompter.read_paths(count)?
    } else {
        cli.paths.clone()
    };

    let failures = actions::setup(&config, &paths);
    actions::summarize(paths.len(), &failures);

    if cli.json {
        print_json_output()?;
    }
    logger.flush();

    if cli.strict && !failures.is_empty() {
        return Err(anyhow!(
            "{} of {} environments failed",
            failures.len(),
            paths.len()
        ));
    }

    Ok(())
}
