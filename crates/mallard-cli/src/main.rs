//! Mallard CLI - batch-oriented SQL schema migrations for DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{down, init, new, rollback, status, up};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args),
        cli::Commands::New(args) => new::execute(args, &cli.global),
        cli::Commands::Up(args) => up::execute(args, &cli.global),
        cli::Commands::Down(args) => down::execute(args, &cli.global),
        cli::Commands::Rollback(args) => rollback::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    }
}
