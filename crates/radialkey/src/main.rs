#![warn(missing_docs)]

//! Entry point for the `radialkey` binary.

mod cli;
mod error;
mod replay;

use std::process;

use clap::Parser;
use radial_config::Config;
use tracing::{error, info};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, load config, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli {
        log,
        config,
        command,
    } = Cli::parse();
    logging::init(&log.spec());

    let config = match config {
        Some(path) => radial_config::load_from_path(&path)?,
        None => Config::default(),
    };

    match command {
        Commands::Check => {
            config.validate()?;
            let table = config.command_table();
            let options = config.sequencer_options();
            info!(commands = table.len(), "config_ok");
            println!(
                "lookup={:?} busy={:?} accelerate={} worst_case={:?}",
                options.lookup,
                options.busy,
                options.accelerate,
                options.timings.worst_case()
            );
            for (command, target) in &table {
                println!("{command} -> {target}");
            }
            Ok(())
        }
        Commands::Resolve(args) => {
            let target = config
                .command_table()
                .resolve(&args.command, &config.default_category)?;
            let key = config.leaf_lookup.key_for(&target);
            println!(
                "{} -> category \"{}\", leaf {key}",
                args.command,
                target.category()
            );
            Ok(())
        }
        Commands::Replay(args) => {
            let scenario = replay::load(&args.scenario)?;
            replay::run(&config, scenario, args.realtime)
        }
    }
}
