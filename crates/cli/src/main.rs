//! `PharmaCart` CLI - maintenance tools for the storefront's storage file.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! pharma-cli catalog
//!
//! # Inspect or empty the persisted cart
//! pharma-cli cart show
//! pharma-cli cart clear
//!
//! # List recorded orders
//! pharma-cli orders list
//!
//! # Inspect or end the signed-in session
//! pharma-cli session show
//! pharma-cli session logout
//!
//! # Point at a different storage file
//! pharma-cli --storage /tmp/pharmacart.json cart show
//! ```
//!
//! A running storefront keeps its stores in memory and only reads the file
//! at startup. Keys it owns are rewritten on its next change to them, so
//! `cart clear` or `session logout` against a live server is undone the next
//! time a shopper touches the cart or session. Stop the server before
//! changing state; `show` and `list` are safe at any time.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pharma-cli")]
#[command(author, version, about = "PharmaCart CLI tools")]
struct Cli {
    /// Storage file (defaults to `PHARMACART_STORAGE_PATH` or `data/pharmacart.json`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the medicine catalog
    Catalog,
    /// Inspect or clear the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect recorded orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect or end the current session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all orders
    List,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the signed-in identity
    Show,
    /// Sign out
    Logout,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match cli.command {
        Commands::Catalog => commands::catalog::list(),
        Commands::Cart { action } => {
            let storage = commands::open_storage(cli.storage)?;
            match action {
                CartAction::Show => commands::cart::show(storage),
                CartAction::Clear => commands::cart::clear(storage),
            }
        }
        Commands::Orders { action } => {
            let storage = commands::open_storage(cli.storage)?;
            match action {
                OrdersAction::List => commands::orders::list(storage),
            }
        }
        Commands::Session { action } => {
            let storage = commands::open_storage(cli.storage)?;
            match action {
                SessionAction::Show => commands::session::show(storage),
                SessionAction::Logout => commands::session::logout(storage),
            }
        }
    };
    print!("{output}");
    Ok(())
}
