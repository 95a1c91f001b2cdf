//! QR Codes CLI - Database migrations and shop management.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! qr-cli migrate
//!
//! # Store a shop's Admin API access token
//! qr-cli shop connect -s your-store.myshopify.com -t shpat_...
//!
//! # Remove a shop's access token
//! qr-cli shop disconnect -s your-store.myshopify.com
//!
//! # List a shop's QR codes
//! qr-cli qrcodes list -s your-store.myshopify.com
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "qr-cli")]
#[command(author, version, about = "QR codes admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Manage shop connections
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Inspect QR codes
    #[command(name = "qrcodes")]
    QrCodes {
        #[command(subcommand)]
        action: QrCodesAction,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// Store an offline Admin API access token for a shop
    Connect {
        /// Shop domain (e.g., your-store.myshopify.com)
        #[arg(short, long)]
        shop: String,

        /// Access token (falls back to `SHOPIFY_ACCESS_TOKEN`)
        #[arg(short, long)]
        token: Option<String>,

        /// Granted scopes, comma-separated
        #[arg(long, default_value = "read_products,write_products")]
        scopes: String,
    },
    /// Remove a shop's access token
    Disconnect {
        /// Shop domain
        #[arg(short, long)]
        shop: String,
    },
}

#[derive(Subcommand)]
enum QrCodesAction {
    /// List a shop's QR codes, newest first
    List {
        /// Shop domain
        #[arg(short, long)]
        shop: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::admin().await?,
        Commands::Shop { action } => match action {
            ShopAction::Connect {
                shop,
                token,
                scopes,
            } => commands::shop::connect(&shop, token, &scopes).await?,
            ShopAction::Disconnect { shop } => commands::shop::disconnect(&shop).await?,
        },
        Commands::QrCodes { action } => match action {
            QrCodesAction::List { shop } => commands::qr_codes::list(&shop).await?,
        },
    }
    Ok(())
}
