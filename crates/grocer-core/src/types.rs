//! # Domain Types
//!
//! Core domain types used throughout Grocer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │                       CatalogItem (closed sum)                          │
//! │        ┌──────────────────┼──────────────────┐                          │
//! │        ▼                  ▼                  ▼                          │
//! │  ┌───────────────┐ ┌───────────────┐ ┌──────────────────────┐          │
//! │  │     Beer      │ │     Bread     │ │      Vegetable       │          │
//! │  │  origin       │ │  baking_date  │ │  price_per_100_grams │          │
//! │  │  unit_price   │ │  unit_price   │ │                      │          │
//! │  └───────────────┘ └───────────────┘ └──────────────────────┘          │
//! │                                                                         │
//! │  OrderRequest ──resolve──► OrderLine ──price──► LineSummary             │
//! │  (category, id, qty)       (item, qty)          (description, net)      │
//! │                                                                         │
//! │  OrderSummary = [LineSummary] + rounded total                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Units
//! Beer and bread quantities count bottles and loaves. Vegetable quantities
//! are grams.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (the middle vegetable weight tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (700 bps → 0.07).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Item Category
// =============================================================================

/// The three purchasable good categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Beer,
    Bread,
    Vegetable,
}

impl ItemCategory {
    /// Wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Beer => "BEER",
            ItemCategory::Bread => "BREAD",
            ItemCategory::Vegetable => "VEGETABLE",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a category name, case-insensitively.
///
/// Anything outside the closed set is an [`CoreError::UnsupportedCategory`].
impl FromStr for ItemCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BEER" => Ok(ItemCategory::Beer),
            "BREAD" => Ok(ItemCategory::Bread),
            "VEGETABLE" => Ok(ItemCategory::Vegetable),
            other => Err(CoreError::UnsupportedCategory(other.to_string())),
        }
    }
}

// =============================================================================
// Country
// =============================================================================

/// Beer origin country.
///
/// Only the countries with a pack rebate get their own variant; every other
/// origin is kept verbatim (upper-cased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Country {
    Belgium,
    Netherlands,
    Germany,
    Other(String),
}

impl Country {
    pub fn as_str(&self) -> &str {
        match self {
            Country::Belgium => "BELGIUM",
            Country::Netherlands => "NETHERLANDS",
            Country::Germany => "GERMANY",
            Country::Other(name) => name,
        }
    }
}

impl From<String> for Country {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_uppercase();
        match normalized.as_str() {
            "BELGIUM" => Country::Belgium,
            "NETHERLANDS" => Country::Netherlands,
            "GERMANY" => Country::Germany,
            _ => Country::Other(normalized),
        }
    }
}

impl From<&str> for Country {
    fn from(value: &str) -> Self {
        Country::from(value.to_string())
    }
}

impl From<Country> for String {
    fn from(country: Country) -> Self {
        country.as_str().to_string()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Catalog Items
// =============================================================================

/// A beer, sold per bottle or can.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    /// Assigned by the catalog; may be blank in hand-written snapshots.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub origin_country: Country,
    /// Price per bottle/can.
    pub unit_price: Money,
}

/// A bread, sold per loaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bread {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub baking_date: NaiveDate,
    /// Price per loaf.
    pub unit_price: Money,
}

impl Bread {
    /// Whole days between the baking date and `today`.
    ///
    /// Negative for a baking date in the future.
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        (today - self.baking_date).num_days()
    }
}

/// A vegetable, sold by weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vegetable {
    #[serde(default)]
    pub id: String,
    /// May be empty.
    #[serde(default)]
    pub name: String,
    pub price_per_100_grams: Money,
}

/// Any purchasable item.
///
/// The set is closed: adding a variant forces every `match` in the gross
/// calculator and the discount rules to handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogItem {
    Beer(Beer),
    Bread(Bread),
    Vegetable(Vegetable),
}

impl CatalogItem {
    pub fn category(&self) -> ItemCategory {
        match self {
            CatalogItem::Beer(_) => ItemCategory::Beer,
            CatalogItem::Bread(_) => ItemCategory::Bread,
            CatalogItem::Vegetable(_) => ItemCategory::Vegetable,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Beer(beer) => &beer.id,
            CatalogItem::Bread(bread) => &bread.id,
            CatalogItem::Vegetable(vegetable) => &vegetable.id,
        }
    }

    /// Display name shown on the receipt.
    pub fn name(&self) -> &str {
        match self {
            CatalogItem::Beer(beer) => &beer.name,
            CatalogItem::Bread(bread) => &bread.name,
            CatalogItem::Vegetable(vegetable) => &vegetable.name,
        }
    }

    /// Unit base price: per bottle, per loaf, or per 100 grams.
    pub fn base_price(&self) -> Money {
        match self {
            CatalogItem::Beer(beer) => beer.unit_price,
            CatalogItem::Bread(bread) => bread.unit_price,
            CatalogItem::Vegetable(vegetable) => vegetable.price_per_100_grams,
        }
    }
}

impl From<Beer> for CatalogItem {
    fn from(beer: Beer) -> Self {
        CatalogItem::Beer(beer)
    }
}

impl From<Bread> for CatalogItem {
    fn from(bread: Bread) -> Self {
        CatalogItem::Bread(bread)
    }
}

impl From<Vegetable> for CatalogItem {
    fn from(vegetable: Vegetable) -> Self {
        CatalogItem::Vegetable(vegetable)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One resolved entry of an order: an item plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item: CatalogItem,
    /// Units for beer and bread, grams for vegetables.
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(item: impl Into<CatalogItem>, quantity: u32) -> Self {
        OrderLine {
            item: item.into(),
            quantity,
        }
    }

    pub fn is_vegetable(&self) -> bool {
        matches!(self.item, CatalogItem::Vegetable(_))
    }

    /// Receipt text for this line.
    ///
    /// ```text
    /// Bread      →  "4 x White Bread"
    /// Beer       →  "6 x Duvel (BELGIUM)"
    /// Vegetable  →  "300g Broccoli"
    /// ```
    pub fn description(&self) -> String {
        match &self.item {
            CatalogItem::Bread(bread) => format!("{} x {}", self.quantity, bread.name),
            CatalogItem::Beer(beer) => {
                format!("{} x {} ({})", self.quantity, beer.name, beer.origin_country)
            }
            CatalogItem::Vegetable(vegetable) => format!("{}g {}", self.quantity, vegetable.name),
        }
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// A raw line as submitted by the caller, before catalog resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub category: ItemCategory,
    pub item_id: String,
    pub quantity: u32,
}

impl OrderRequest {
    pub fn new(category: ItemCategory, item_id: impl Into<String>, quantity: u32) -> Self {
        OrderRequest {
            category,
            item_id: item_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// A priced receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub description: String,
    /// Undiscounted value.
    pub gross: Money,
    /// Amount taken off the gross value.
    pub discount: Money,
    /// `gross - discount`, unrounded.
    pub net: Money,
}

/// The priced order.
///
/// `lines` keeps the request order. `total` is the sum of every line's `net`,
/// rounded half up to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub lines: Vec<LineSummary>,
    pub total: Money,
}

impl OrderSummary {
    /// An order with no lines.
    pub fn empty() -> Self {
        OrderSummary {
            lines: Vec::new(),
            total: Money::zero().round_to_cents(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line gross values, unrounded.
    pub fn gross_total(&self) -> Money {
        self.lines.iter().map(|line| line.gross).sum()
    }

    /// Sum of line discounts, unrounded.
    pub fn discount_total(&self) -> Money {
        self.lines.iter().map(|line| line.discount).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
