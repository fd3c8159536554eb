//! # grocer-core: Order Pricing & Discount Engine
//!
//! This crate is the **heart** of Grocer. It prices a shopping order made of
//! beers, breads and vegetables, applies one discount policy per category,
//! and produces a receipt summary. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/checkout (CLI)                          │   │
//! │  │    order.json ──► price ──► receipt / JSON summary             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ discount  │  │  engine   │  │   │
//! │  │   │  Beer     │  │  gross    │  │ BeerPack  │  │ resolve   │  │   │
//! │  │   │  Bread    │  │  per line │  │ Freshness │  │ validate  │  │   │
//! │  │   │ Vegetable │  │           │  │ Weight    │  │ aggregate │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK EXCEPT price_order()          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogLookup                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 grocer-catalog (master data)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog items, order lines, summaries
//! - [`money`] - Exact decimal money with half-up rounding
//! - [`pricing`] - Gross line values
//! - [`discount`] - The three discount rules
//! - [`engine`] - The order pricing pipeline
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::money::Money;
//! use grocer_core::types::DiscountRate;
//!
//! // 300 g of broccoli at 1.50 per 100 g, 7% weight discount
//! let gross = Money::from_cents(450);
//! let net = gross - gross.apply_rate(DiscountRate::from_bps(700));
//!
//! assert_eq!(net.amount().to_string(), "4.185");
//! assert_eq!(net.round_to_cents().to_string(), "4.19");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod engine;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{DiscountRule, DiscountStrategy, PricingContext};
pub use engine::{CatalogLookup, OrderPricingEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Bread older than this many days cannot be sold.
///
/// Enforced both when bread enters the catalog and again at pricing time,
/// since a loaf keeps ageing after intake.
pub const MAX_BREAD_AGE_DAYS: i64 = 6;

/// Beers from one country are bundled into packs of this size.
pub const BEER_PACK_SIZE: u32 = 6;

/// Maximum item name length, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
