//! Clientbook CLI - customers and their orders from the terminal

mod commands;
mod menu;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clientbook::config;
use clientbook::output::OutputMode;
use clientbook::Database;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "clientbook")]
#[command(version)]
#[command(about = "Keep customers and their orders in a local SQLite file")]
#[command(long_about = r#"
Clientbook stores customers and orders in a single SQLite database.
Deleting a customer also deletes all of that customer's orders.

Example usage:
  clientbook customer add --name Ana --email ana@x.com --phone 111
  clientbook order add --customer 1 --product Widget --amount 49.90
  clientbook order list
  clientbook menu
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerCommand,
    },

    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderCommand,
    },

    /// Show row counts
    Stats,

    /// Interactive menu
    Menu,
}

#[derive(Subcommand)]
enum CustomerCommand {
    /// Add a customer
    Add {
        #[arg(short, long)]
        name: String,

        /// Must not belong to another customer
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: Option<String>,
    },

    /// List all customers
    List,

    /// Show one customer
    Show { id: i64 },

    /// Replace a customer's name, email and phone
    Update {
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Delete a customer and all of their orders
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrderCommand {
    /// Add an order for an existing customer
    Add {
        /// Customer ID
        #[arg(short, long)]
        customer: i64,

        #[arg(short, long)]
        product: String,

        #[arg(short, long)]
        amount: f64,

        /// Order date as YYYY-MM-DD (defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// List all orders with their customers, newest first
    List,

    /// Delete one order
    Delete { id: i64 },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Customer { action } => match action {
                CustomerCommand::Add { .. } => "customer.add",
                CustomerCommand::List => "customer.list",
                CustomerCommand::Show { .. } => "customer.show",
                CustomerCommand::Update { .. } => "customer.update",
                CustomerCommand::Delete { .. } => "customer.delete",
            },
            Commands::Order { action } => match action {
                OrderCommand::Add { .. } => "order.add",
                OrderCommand::List => "order.list",
                OrderCommand::Delete { .. } => "order.delete",
            },
            Commands::Stats => "stats",
            Commands::Menu => "menu",
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    clientbook::order::parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps stdout clean for tables and JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("clientbook=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_json_flag(cli.json);
    let command_name = cli.command.name();

    match run(cli, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{} failed: {:?}", command_name, e);
            commands::emit_error(output_mode, command_name, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    let command = match cli.command {
        Commands::Init { force } => {
            return commands::run_init(output_mode, &config_path, cli.database, force);
        }
        other => other,
    };

    let loaded = config::load_config(Some(&config_path))?;
    let db_path = config::resolve_database_path(cli.database, loaded.as_ref());
    let db = Database::new(db_path);
    db.ensure_schema()?;

    match command {
        Commands::Init { .. } => Ok(()),

        Commands::Customer { action } => match action {
            CustomerCommand::Add { name, email, phone } => {
                commands::customer_add(&db, output_mode, name, email, phone)
            }
            CustomerCommand::List => commands::customer_list(&db, output_mode),
            CustomerCommand::Show { id } => commands::customer_show(&db, output_mode, id),
            CustomerCommand::Update { id, name, email, phone } => {
                commands::customer_update(&db, output_mode, id, name, email, phone)
            }
            CustomerCommand::Delete { id, yes } => {
                commands::customer_delete(&db, output_mode, id, yes)
            }
        },

        Commands::Order { action } => match action {
            OrderCommand::Add { customer, product, amount, date } => {
                commands::order_add(&db, output_mode, customer, product, amount, date)
            }
            OrderCommand::List => commands::order_list(&db, output_mode),
            OrderCommand::Delete { id } => commands::order_delete(&db, output_mode, id),
        },

        Commands::Stats => commands::run_stats(&db, output_mode),

        Commands::Menu => menu::run(&db),
    }
}
