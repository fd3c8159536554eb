//! # grocer-catalog: Catalog Master Data for Grocer
//!
//! This crate stores the beers, breads and vegetables Grocer sells in a
//! local SQLite database, and hands the pricing engine the items an order
//! refers to as a [`CatalogLookup`](grocer_core::CatalogLookup).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Data Flow                                 │
//! │                                                                         │
//! │  checkout <order.json>                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 grocer-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Catalog    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ beer / bread  │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │◄───│  / vegetable  │    │ 001_catalog  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │ prefetch(requests)                                 │   │
//! │  │           ▼                                                    │   │
//! │  │   CatalogSnapshot (CatalogLookup, JSON import/export)          │   │
//! │  └───────────┬─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  OrderPricingEngine (grocer-core)                                      │
//! │                                                                         │
//! │  ~/.local/share/grocer/catalog.db (or GROCER_CATALOG)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - One repository per item category
//! - [`catalog`] - Import/export, price list, prefetching
//! - [`snapshot`] - JSON snapshots and the engine lookup
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grocer_catalog::{Catalog, CatalogConfig};
//! use grocer_core::OrderPricingEngine;
//!
//! let catalog = Catalog::open(CatalogConfig::new(&path)).await?;
//! let items = catalog.prefetch(&requests).await?;
//! let summary = OrderPricingEngine::new(&items).price_order(&requests)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use pool::{Catalog, CatalogConfig};
pub use snapshot::CatalogSnapshot;

pub use repository::{BeerDraft, BreadDraft, VegetableDraft};
pub use repository::{BeerRepository, BreadRepository, VegetableRepository};
