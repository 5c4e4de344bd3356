//! Aquafarm CLI - Browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! aquafarm catalog
//!
//! # Add 20kg of live catfish (defaults to the product's minimum order)
//! aquafarm cart add live-catfish --quantity 20
//!
//! # Show the cart
//! aquafarm cart show
//!
//! # Place an order
//! aquafarm checkout --name "Ada Okafor" --email ada@example.ng \
//!     --phone 08031234567 --address "12 Pond Road, Ibadan"
//!
//! # Admin: move an order along
//! aquafarm orders status <reference> processing
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `cart` - Show, add, update, remove, clear
//! - `checkout` - Validate contact details and place an order
//! - `orders` - List orders and change their status

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aquafarm_cart::CartConfig;

mod commands;

#[derive(Parser)]
#[command(name = "aquafarm")]
#[command(author, version, about = "Aquafarm storefront CLI")]
struct Cli {
    /// Directory holding the cart and order snapshots (overrides `AQUAFARM_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// YAML catalog to use instead of the built-in one (overrides `AQUAFARM_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Catalog,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Place an order for the current cart
    Checkout {
        /// Full name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Phone number (e.g. 08031234567)
        #[arg(long)]
        phone: String,
        /// Delivery address
        #[arg(long)]
        address: String,
    },
    /// Manage placed orders
    Orders {
        #[command(subcommand)]
        action: OrdersCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show cart contents and total
    Show {
        /// Print the raw cart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product (quantity defaults to its minimum order)
    Add {
        /// Product ID from the catalog
        product: String,
        /// Quantity to add
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Set the quantity of a product already in the cart (0 removes it)
    Update {
        /// Product ID
        product: String,
        /// New quantity
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersCommand {
    /// List placed orders
    List,
    /// Change an order's status (`pending`, `processing`, `delivered`, `cancelled`)
    Status {
        /// Order reference (UUID)
        reference: String,
        /// New status
        status: String,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aquafarm_cli=info,aquafarm_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    match cli.command {
        Commands::Catalog => commands::catalog::list(&config)?,
        Commands::Cart { action } => match action {
            CartCommand::Show { json } => commands::cart::show(&config, json)?,
            CartCommand::Add { product, quantity } => {
                commands::cart::add(&config, &product, quantity)?;
            }
            CartCommand::Update { product, quantity } => {
                commands::cart::update(&config, &product, quantity)?;
            }
            CartCommand::Remove { product } => commands::cart::remove(&config, &product)?,
            CartCommand::Clear => commands::cart::clear(&config)?,
        },
        Commands::Checkout {
            name,
            email,
            phone,
            address,
        } => {
            let form = aquafarm_cart::CheckoutForm {
                name,
                email,
                phone,
                address,
            };
            commands::checkout::run(&config, &form)?;
        }
        Commands::Orders { action } => match action {
            OrdersCommand::List => commands::orders::list(&config)?,
            OrdersCommand::Status { reference, status } => {
                commands::orders::set_status(&config, &reference, &status)?;
            }
        },
    }
    Ok(())
}
