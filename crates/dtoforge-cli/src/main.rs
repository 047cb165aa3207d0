//! dtoforge CLI - DTO class generator
//!
//! Commands:
//! - `dtoforge generate` - Generate DTO classes for a root type
//! - `dtoforge check` - Load a source and report unsupported or dangling types

use clap::{Parser, Subcommand};

mod check;
mod generate;
mod logging;
mod project;
mod sink;
mod source;

use logging::LogLevel;

#[derive(Parser)]
#[command(name = "dtoforge")]
#[command(author, version, about = "Generate validated DTO classes from domain types", long_about = None)]
struct Cli {
    /// Log level (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DTO classes for a root type
    Generate(generate::GenerateArgs),

    /// Load a source and report unsupported or dangling types
    Check(check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    match cli.command {
        Commands::Generate(args) => {
            generate::run(args)?;
        }
        Commands::Check(args) => {
            check::run(args)?;
        }
    }

    Ok(())
}
