use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use depval::{DependencyKind, InclusionStrategy, ValidationOptions};

use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::utils::logging::setup_logger;

#[derive(Parser)]
#[command(name = "depval")]
#[command(about = "Validate discovered data dependencies against a database", long_about = None)]
struct Cli {
    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (text, json, table)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the candidates declared in a discovery log
    Parse {
        /// Discovery log file
        log: PathBuf,
    },

    /// Validate every candidate of a log against a SQLite database
    Validate {
        /// Discovery log file
        log: PathBuf,

        /// SQLite database file
        #[arg(short, long)]
        database: PathBuf,

        /// SQL formulation for inclusion dependencies
        #[arg(long, value_enum, default_value_t = InclusionStrategy::OuterJoin)]
        ind_strategy: InclusionStrategy,

        /// Only validate these kinds (UCC, OD, IND, FD); repeatable
        #[arg(short, long = "kind", value_parser = DependencyKind::from_token)]
        kinds: Vec<DependencyKind>,
    },

    /// Measure the amortized validation time of every candidate
    Bench {
        /// Discovery log file
        log: PathBuf,

        /// SQLite database file
        #[arg(short, long)]
        database: PathBuf,

        /// SQL formulation for inclusion dependencies
        #[arg(long, value_enum, default_value_t = InclusionStrategy::OuterJoin)]
        ind_strategy: InclusionStrategy,

        /// Timed validations per candidate
        #[arg(short, long, default_value_t = 10)]
        repetitions: usize,
    },
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose);
    info!("Starting depval CLI");

    let mut context = Context::new(cli.verbose, cli.format, !cli.no_color);

    let result = match cli.command {
        Commands::Parse { log } => {
            commands::parse::execute(&mut context, &log)
        },
        Commands::Validate { log, database, ind_strategy, kinds } => {
            context.set_options(ValidationOptions { inclusion_strategy: ind_strategy });
            commands::validate::execute(&mut context, &log, &database, &kinds)
        },
        Commands::Bench { log, database, ind_strategy, repetitions } => {
            context.set_options(ValidationOptions { inclusion_strategy: ind_strategy });
            commands::bench::execute(&mut context, &log, &database, repetitions)
        },
    };

    if let Err(e) = &result {
        eprintln!("{}", context.formatter().format_error(&e.to_string()));
    }

    info!("depval CLI finished");
    result
}
