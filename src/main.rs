//! texbuild - random block placement rules
//!
//! Command-line front end: explains filter verdicts for an inventory
//! snapshot and simulates placement clicks offline.

mod config;
mod explain;
mod simulate;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use config::{ClientConfig, DEFAULT_CONFIG_PATH};
use simulate::SimulationOptions;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Random block placement rules", long_about = None)]
struct Args {
    /// Settings file (camelCase JSON)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// Force the filter's debug tracing on
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filter verdict for every occupied slot
    Explain {
        /// Inventory snapshot (JSON)
        inventory: PathBuf,
    },
    /// Run placement clicks through client, codec and an in-process server
    Simulate {
        /// Inventory snapshot (JSON)
        inventory: PathBuf,

        #[arg(long, default_value_t = 1000)]
        clicks: u64,

        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Skip the availability handshake (hotbar-only placement)
        #[arg(long)]
        offline: bool,

        /// Turn random placement mode on even if the settings file leaves it off
        #[arg(long)]
        random_mode: bool,

        /// Write one JSON line per click to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Write a default settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Log directives added by `--debug` so filter and selector traces show up.
const DEBUG_DIRECTIVES: &str =
    "warn,texbuild=debug,texbuild_core=debug,texbuild_client=debug,texbuild_server=debug";

fn main() -> Result<()> {
    let args = Args::parse();

    // WARN by default (DEBUG for our crates with --debug); RUST_LOG overrides.
    // Logs go to stderr so they never mix with command output.
    let default_directives = if args.debug { DEBUG_DIRECTIVES } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directives)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::InitConfig { force } => init_config(&args.config, force),
        Command::Explain { inventory } => {
            let config = load_config(&args.config, args.debug);
            let inventory = config::load_inventory_snapshot(&inventory)?;
            for line in explain::explain(&inventory, &config.settings) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Simulate {
            inventory,
            clicks,
            seed,
            offline,
            random_mode,
            trace,
        } => {
            let config = load_config(&args.config, args.debug);
            let inventory = config::load_inventory_snapshot(&inventory)?;
            let options = SimulationOptions {
                clicks,
                seed,
                offline,
                force_random_mode: random_mode,
            };
            let report = simulate::run(&config, inventory, &options, trace.as_deref())?;

            println!(
                "{} clicks, {} without a change, {} relocations",
                report.histogram.trials(),
                report.histogram.misses(),
                report.relocations
            );
            for slot in report.histogram.selected_indices() {
                println!(
                    "hotbar[{slot}]: {} ({:.1}%)",
                    report.histogram.count(slot),
                    report.histogram.frequency(slot) * 100.0
                );
            }
            println!(
                "server: {} swaps completed, {} rejected",
                report.server.completed, report.server.rejected
            );
            let active = report.inventory.active_slot();
            match report.inventory.active_stack() {
                Some(stack) => println!(
                    "in hand: hotbar[{active}] {} x{}",
                    stack.item.code, stack.count
                ),
                None => println!("in hand: hotbar[{active}] empty"),
            }
            Ok(())
        }
    }
}

fn load_config(path: &Path, debug: bool) -> ClientConfig {
    let mut config = ClientConfig::load_from_path(path);
    if debug {
        config.settings.debug_mode = true;
    }
    info!(
        "Loaded settings from {} (random mode {}, entire inventory {})",
        path.display(),
        config.random_mode_enabled,
        config.use_entire_inventory
    );
    config
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ClientConfig::default().save_to_path(path)?;
    info!("Wrote default settings to {}", path.display());
    println!("{}", path.display());
    Ok(())
}
