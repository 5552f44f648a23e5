//! Catalog Hierarchy CLI Tool
//!
//! Command-line interface for inspecting and seeding category hierarchies
//! from snapshot files exported by the catalog store.

use catalog_hierarchy_cli::commands::{run, Cli};
use clap::Parser;
use colored::Colorize;
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    dotenv::dotenv().ok();

    let stdout = io::stdout();
    match run(cli, &mut stdout.lock()) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
