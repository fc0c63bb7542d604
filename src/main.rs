use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxroute::core::{Strategy, log::init_logging};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Routing strategy to use instead of the configured one (dense or bfs)
    #[arg(short, long, global = true)]
    strategy: Option<Strategy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    /// Display conversions between every pair of configured currencies
    Table {
        #[arg(short, long, default_value_t = 1.0)]
        amount: f64,
    },
    /// Check that both routing strategies agree on the configured rates
    Verify,
}

impl From<Commands> for fxroute::AppCommand {
    fn from(cmd: Commands) -> fxroute::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                fxroute::AppCommand::Convert { amount, from, to }
            }
            Commands::Table { amount } => fxroute::AppCommand::Table { amount },
            Commands::Verify => fxroute::AppCommand::Verify,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => fxroute::cli::setup::setup(),
        Some(cmd) => fxroute::run_command(cmd.into(), cli.config_path.as_deref(), cli.strategy),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
