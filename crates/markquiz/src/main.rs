/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! markquiz CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "markquiz")]
#[command(version)]
#[command(about = "Parse, check and grade quiz markup", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the questions of a quiz
    Parse {
        /// Quiz file ('-' for stdin)
        input: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report markup problems in a quiz
    ///
    /// `--config` is loaded and validated, but no setting applies to checking.
    Check {
        /// Quiz file ('-' for stdin)
        input: String,

        /// Also check that a responses file fits the questions
        #[arg(long)]
        responses: Option<PathBuf>,

        /// Fail on warnings too
        #[arg(long)]
        deny_warnings: bool,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade responses against a quiz
    Grade {
        /// Quiz file ('-' for stdin)
        input: String,

        /// Responses file (JSON array, or YAML for .yml/.yaml)
        #[arg(short, long)]
        responses: PathBuf,

        /// Fail on questions that cannot be graded
        #[arg(long)]
        strict: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "markquiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { input, format } => commands::parse::execute(commands::parse::ParseArgs {
            input,
            format,
            config,
        }),
        Commands::Check {
            input,
            responses,
            deny_warnings,
            json,
        } => commands::check::execute(commands::check::CheckArgs {
            input,
            responses,
            deny_warnings,
            json,
        }),
        Commands::Grade {
            input,
            responses,
            strict,
            json,
        } => {
            let mut config = config;
            config.grading.strict |= strict;
            commands::grade::execute(commands::grade::GradeArgs {
                input,
                responses,
                json,
                config,
            })
        }
    }
}
