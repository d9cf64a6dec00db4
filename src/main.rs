use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxwatch::core::log::init_logging;
use fxwatch::{AppCommand, SelectCommand};

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch rates and display the selected currencies
    Rates {
        /// Base currency, defaults to the configured one
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    /// Manage the selected currencies
    #[command(subcommand)]
    Select(SelectCommands),
}

#[derive(Subcommand)]
enum SelectCommands {
    /// Show the selected currencies
    List,
    /// Select currencies
    Add { codes: Vec<String> },
    /// Deselect currencies
    Remove { codes: Vec<String> },
    /// Select currencies that are not selected, deselect the others
    Toggle { codes: Vec<String> },
    /// Replace the selection as given
    Set { codes: Vec<String> },
    /// Deselect everything
    Clear,
}

impl From<SelectCommands> for SelectCommand {
    fn from(cmd: SelectCommands) -> SelectCommand {
        match cmd {
            SelectCommands::List => SelectCommand::List,
            SelectCommands::Add { codes } => SelectCommand::Add(codes),
            SelectCommands::Remove { codes } => SelectCommand::Remove(codes),
            SelectCommands::Toggle { codes } => SelectCommand::Toggle(codes),
            SelectCommands::Set { codes } => SelectCommand::Set(codes),
            SelectCommands::Clear => SelectCommand::Clear,
        }
    }
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Rates { base } => AppCommand::Rates { base },
            Commands::Convert { amount, from, to } => AppCommand::Convert { amount, from, to },
            Commands::Select(select) => AppCommand::Select(select.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxwatch::cli::setup::setup(),
        Some(cmd) => fxwatch::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
