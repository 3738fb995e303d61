//! Grocer CLI - grocery marketplace client in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use grocer_core::{Error, LogEvent, LoggingService};

mod commands;
mod output;

use commands::{account, config, dashboard, invite, logs, product, warehouse};

/// Grocer - grocery marketplace client in your terminal
#[derive(Parser)]
#[command(name = "grocer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the marketplace
    Signin {
        #[arg(long)]
        email: Option<String>,
        /// Password (or GROCER_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a consumer account
    Signup(account::SignupArgs),

    /// Sign out and forget the saved session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what your role can do
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search, register and assign products
    Product {
        #[command(subcommand)]
        command: product::ProductCommands,
    },

    /// Manage warehouses
    Warehouse {
        #[command(subcommand)]
        command: warehouse::WarehouseCommands,
    },

    /// Invite administrators
    Invite {
        #[command(subcommand)]
        command: invite::InviteCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

impl Commands {
    /// Name recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Signin { .. } => "signin",
            Commands::Signup(_) => "signup",
            Commands::Logout { .. } => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Dashboard { .. } => "dashboard",
            Commands::Product { command } => match command {
                product::ProductCommands::Search { .. } => "product search",
                product::ProductCommands::Register { .. } => "product register",
                product::ProductCommands::Assign { .. } => "product assign",
            },
            Commands::Warehouse { .. } => "warehouse create",
            Commands::Invite { command } => match command {
                invite::InviteCommands::AppAdmin { .. } => "invite app-admin",
                invite::InviteCommands::WarehouseAdmin { .. } => "invite warehouse-admin",
            },
            Commands::Logs { .. } => "logs",
            Commands::Config { .. } => "config",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.name();

    let logger = commands::get_logger();
    if let Some(l) = &logger {
        let _ = l.log_command(command);
    }

    match run(cli, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            let event = LogEvent::new("command_failed").with_command(command);
            let event = match e.downcast_ref::<Error>() {
                Some(core) => event.with_failure(core),
                None => event.with_error(format!("{:#}", e)),
            };
            commands::log_event(&logger, event);
            ExitCode::FAILURE
        }
    }
}

/// Print an error, with a hint for the failures users can act on
fn report(error: &anyhow::Error) {
    match error.downcast_ref::<Error>() {
        Some(Error::Validation(errors)) => output::validation_errors(errors),
        Some(e @ Error::Unauthorized(_)) => {
            output::error(&e.to_string());
            output::warning("Your session may have expired. Run 'grocer signin' again.");
        }
        Some(e @ Error::Network(_)) => {
            output::error(&e.to_string());
            output::warning("Check the marketplace URL with 'grocer config show'.");
        }
        _ => output::error(&format!("{:#}", error)),
    }
}

fn run(cli: Cli, logger: &Option<LoggingService>) -> Result<()> {
    match cli.command {
        Commands::Signin { email, password, json } => {
            account::run_signin(logger, email, password, json)
        }
        Commands::Signup(args) => account::run_signup(logger, args),
        Commands::Logout { json } => account::run_logout(logger, json),
        Commands::Whoami { json } => account::run_whoami(logger, json),
        Commands::Dashboard { json } => dashboard::run(logger, json),
        Commands::Product { command } => product::run(logger, command),
        Commands::Warehouse { command } => warehouse::run(logger, command),
        Commands::Invite { command } => invite::run(logger, command),
        Commands::Logs { command } => logs::run(logger, command),
        Commands::Config { command } => config::run(command),
    }
}
