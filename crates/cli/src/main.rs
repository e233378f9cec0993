//! Bazaar CLI - a terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! bazaar products
//!
//! # Log in (prompts for the password when --password is omitted)
//! bazaar login -e buyer@example.com
//!
//! # Fill the cart and check out
//! bazaar cart add 12 -q 2
//! bazaar cart show
//! bazaar checkout
//!
//! # Manage your products as a seller
//! bazaar seller create -n "Brass Lamp" -p 45.50 -s 3
//! bazaar seller delete 12 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `BAZAAR_API_URL` - Backend API base URL
//! - `BAZAAR_STATE_DIR` - Where the session and cart are kept
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - Error tracking (optional)
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_core::{ProductId, Role};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront from the terminal")]
struct Cli {
    /// Backend API base URL (overrides `BAZAAR_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Products,
    /// Log in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Account role (`customer`, `seller`, `admin`)
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
    /// Forget the session
    Logout,
    /// Show the logged-in user and cart size
    Whoami,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart
    Checkout,
    /// Manage products (sellers only)
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and total
    Show,
    /// Add a product
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { product_id: ProductId },
    /// Set a product's quantity (0 removes it)
    Set { product_id: ProductId, quantity: u32 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum SellerAction {
    /// List products
    List,
    /// Create a product
    Create {
        #[command(flatten)]
        fields: commands::seller::ProductFields,
    },
    /// Change some fields of a product
    Update {
        product_id: ProductId,

        #[command(flatten)]
        fields: commands::seller::ProductFields,
    },
    /// Delete a product
    Delete {
        product_id: ProductId,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info,bazaar_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be up before the tracing layer that feeds it
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let mut state = AppState::new(&config);

    match run(cli.command, &mut state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(
    api_url: Option<&str>,
) -> Result<StorefrontConfig, bazaar_storefront::config::ConfigError> {
    let config = StorefrontConfig::from_env()?;
    match api_url {
        Some(url) => config.with_api_url(url),
        None => Ok(config),
    }
}

async fn run(command: Commands, state: &mut AppState) -> Result<(), commands::CommandError> {
    match command {
        Commands::Products => commands::catalog::list(state).await,
        Commands::Login { email, password } => {
            commands::auth::login(state, email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
            role,
        } => commands::auth::register(state, name, email, password, role).await,
        Commands::Logout => {
            commands::auth::logout(state);
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami(state);
            Ok(())
        }
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(state);
                Ok(())
            }
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(state, product_id, quantity).await,
            CartAction::Remove { product_id } => {
                commands::cart::remove(state, product_id);
                Ok(())
            }
            CartAction::Set {
                product_id,
                quantity,
            } => {
                commands::cart::set(state, product_id, quantity);
                Ok(())
            }
            CartAction::Clear => {
                commands::cart::clear(state);
                Ok(())
            }
        },
        Commands::Checkout => commands::cart::checkout(state).await,
        Commands::Seller { action } => {
            let mut dashboard = commands::seller::open(state).await?;
            match action {
                SellerAction::List => {
                    commands::seller::list(&dashboard);
                    Ok(())
                }
                SellerAction::Create { fields } => {
                    commands::seller::create(&mut dashboard, state, fields).await
                }
                SellerAction::Update { product_id, fields } => {
                    commands::seller::update(&mut dashboard, state, product_id, fields).await
                }
                SellerAction::Delete { product_id, yes } => {
                    commands::seller::delete(&mut dashboard, state, product_id, yes).await
                }
            }
        }
    }
}
