//! crossplan CLI - plans and builds the SPIRV-Cross C API library

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crossplan::builder::ConstraintViolation;
use crossplan::util::diagnostic;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ConstraintViolation>() {
            Some(violation) => diagnostic::emit(&violation.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("crossplan=debug")
    } else {
        EnvFilter::new("crossplan=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .init();

    // Execute command
    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Explain(args) => commands::explain::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
