//! # retouche
//!
//! Command-line runner for the Retouche codemods.
//!
//! Finds `.vue` files, runs a transformation over each of them in parallel
//! and reports how many files every transformation changed.

mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "retouche")]
#[command(about = "Rewrite Vue Options API components into <script setup>", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transformation over .vue files
    Run(commands::run::RunArgs),

    /// List the available transformations
    List,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::List => commands::list::run(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}
