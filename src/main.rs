use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxview::cli::setup::setup;
use fxview::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxview::AppCommand {
    fn from(cmd: Commands) -> fxview::AppCommand {
        match cmd {
            Commands::List => fxview::AppCommand::List,
            Commands::Show { code } => fxview::AppCommand::Show { code },
            Commands::Convert { code, amount } => fxview::AppCommand::Convert { code, amount },
            Commands::Browse => fxview::AppCommand::Browse,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the latest rate of every currency
    List,
    /// Display latest rate and history of one currency
    Show {
        /// Currency code, e.g. USD
        code: String,
    },
    /// Convert an amount in EUR into a currency
    Convert {
        /// Target currency code, e.g. USD
        code: String,
        /// Amount in EUR
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Browse rates interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxview::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
