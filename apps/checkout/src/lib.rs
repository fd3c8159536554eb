//! # Grocer Checkout
//!
//! Command-line front end for the pricing engine. Reads an order file,
//! prices it against the catalog database and prints a receipt.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► cli::Command ──► CheckoutConfig::from_env()                  │
//! │                                   │                                    │
//! │        order.json ──► order::read_order                                │
//! │                                   │                                    │
//! │  catalog.db ─► Catalog::prefetch ─► OrderPricingEngine::price_order_on │
//! │                                   │                                    │
//! │                   receipt::render_receipt  or  JSON summary            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so `--json` output can be piped.

pub mod cli;
pub mod config;
pub mod error;
pub mod order;
pub mod receipt;

use tracing_subscriber::EnvFilter;

pub use cli::{execute, run, Command};
pub use config::CheckoutConfig;
pub use error::{AppError, ErrorCode};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter, e.g. `RUST_LOG=grocer_core=debug`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
