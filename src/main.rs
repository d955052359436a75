//! Binary entry point for hoopgraph.
//!
//! This binary provides the CLI for loading the basketball graph and asking
//! questions about it.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use hoopgraph::config::CONFIG_PATH_ENV;
use hoopgraph::observability::{self, InitOptions};
use hoopgraph::{HoopgraphConfig, Loader, Neo4jStore, Reply, Session};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Hoopgraph - questions about basketball players and teams, answered from a graph.
#[derive(Parser)]
#[command(name = "hoopgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt (default).
    Repl,

    /// Load the CSV files into the graph.
    Load {
        /// Directory holding the CSV files.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Drop and recreate the database first. Destroys all data.
        #[arg(long)]
        recreate: bool,
    },

    /// Answer a single question and exit.
    Ask {
        /// The question, e.g. "who has the most rebounds".
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the effective configuration.
    Config,
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match HoopgraphConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_config(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    for (path, reason) in &config.skipped_files {
        tracing::warn!(path = %path.display(), error = %reason, "Ignoring unreadable config file");
    }

    match run_command(cli.command.unwrap_or(Commands::Repl), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &HoopgraphConfig) -> anyhow::Result<()> {
    match command {
        Commands::Repl => cmd_repl(config),
        Commands::Load { data_dir, recreate } => cmd_load(config, data_dir, recreate),
        Commands::Ask { text } => cmd_ask(config, &text.join(" ")),
        Commands::Config => {
            cmd_config(config);
            Ok(())
        },
    }
}

/// Connects to the store, reporting a failed connection without aborting.
fn connect(config: &HoopgraphConfig) -> anyhow::Result<Neo4jStore> {
    let store = Neo4jStore::connect(&config.store).context("Failed to start graph client")?;
    if !store.is_connected() {
        eprintln!(
            "Could not connect to {} as {}; queries will fail until the server is reachable.",
            config.store.uri, config.store.user
        );
    }
    Ok(store)
}

fn cmd_repl(config: &HoopgraphConfig) -> anyhow::Result<()> {
    let store = connect(config)?;
    let session = Session::open(&store, config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let answered = session.run(stdin.lock(), &mut stdout);
    store.close();

    let answered = answered.context("Interactive session failed")?;
    tracing::info!(answered, "Session ended");
    Ok(())
}

fn cmd_ask(config: &HoopgraphConfig, question: &str) -> anyhow::Result<()> {
    let store = connect(config)?;
    let reply = Session::open(&store, config).answer(question);
    store.close();

    if let Reply::Blocks(_) = reply {
        let mut stdout = io::stdout();
        writeln!(stdout, "{reply}").context("Failed to write answer")?;
    }
    Ok(())
}

fn cmd_load(
    config: &HoopgraphConfig,
    data_dir: Option<PathBuf>,
    recreate: bool,
) -> anyhow::Result<()> {
    let store = connect(config)?;
    let mut loader = Loader::new(&store, &config.loader);
    if let Some(dir) = data_dir {
        loader = loader.with_data_dir(dir);
    }

    let result = (|| -> anyhow::Result<_> {
        if recreate {
            loader
                .recreate_database()
                .context("Failed to recreate database")?;
        }
        loader.load_all().context("Load failed")
    })();
    store.close();

    let report = result?;
    println!("{report}");
    Ok(())
}

fn cmd_config(config: &HoopgraphConfig) {
    let entries = config.describe();
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("{key:<width$}  {value}");
    }
}
