//! # Repository Module
//!
//! One repository per item category.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog                                                                │
//! │  ├── beers()       ─► BeerRepository       ─┐                          │
//! │  ├── breads()      ─► BreadRepository      ─┼─► SqlitePool             │
//! │  └── vegetables()  ─► VegetableRepository  ─┘   beers / breads /       │
//! │                                                  vegetables tables      │
//! │                                                                         │
//! │  Every repository offers:                                               │
//! │  insert(draft) · update(id, draft) · delete(id)                         │
//! │  get_by_id(id) · list() · count()                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Intake rules run in Rust before any SQL. Uniqueness is left to the
//! schema's UNIQUE constraints.
//!
//! ## Available Repositories
//!
//! - [`BeerRepository`] - unique names, origin country
//! - [`BreadRepository`] - baking dates, intake freshness
//! - [`VegetableRepository`] - optional names, price per 100 g

pub mod beer;
pub mod bread;
pub mod vegetable;

pub use beer::{BeerDraft, BeerRepository};
pub use bread::{BreadDraft, BreadRepository};
pub use vegetable::{VegetableDraft, VegetableRepository};

use std::str::FromStr;

use grocer_core::{ItemCategory, Money};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Fresh UUID v4 string for a new record.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Snapshot records may leave the id blank; those get a fresh one.
pub(crate) fn id_or_new(id: &str) -> String {
    let id = id.trim();
    if id.is_empty() {
        new_id()
    } else {
        id.to_string()
    }
}

/// Prices are stored as decimal TEXT, never REAL.
pub(crate) fn price_column(price: Money) -> String {
    price.amount().to_string()
}

pub(crate) fn parse_price(entity: ItemCategory, id: &str, raw: &str) -> CatalogResult<Money> {
    Decimal::from_str(raw.trim())
        .map(Money::new)
        .map_err(|_| CatalogError::invalid_record(entity, id, format!("bad price '{}'", raw)))
}
