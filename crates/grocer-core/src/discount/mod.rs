//! # Discount Rules
//!
//! One discount policy per good category, all behind the same two-method
//! contract.
//!
//! ## The Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  aggregate_discount(lines)   discount over a whole set of lines;        │
//! │                              may pool quantities across lines           │
//! │                                                                         │
//! │  per_line_discount(line)     discount for one line seen on its own      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pooling Scope
//! ```text
//! ┌───────────────────┬─────────────────────────┬──────────────────────────┐
//! │ Rule              │ aggregate_discount      │ per_line_discount        │
//! ├───────────────────┼─────────────────────────┼──────────────────────────┤
//! │ BeerPackDiscount  │ pools by origin country │ own quantity only        │
//! │ BreadFreshness    │ sum of per-line values  │ own quantity only        │
//! │ VegetableWeight   │ pools ALL vegetables    │ own weight picks tier    │
//! └───────────────────┴─────────────────────────┴──────────────────────────┘
//! ```
//!
//! The engine prices beer and bread lines with `per_line_discount`, and
//! shares the pooled vegetable discount out by gross value. See
//! [`crate::engine`].
//!
//! Every rule returns zero for lines of a category it does not cover, and
//! none depends on line order.

mod beer;
mod bread;
mod vegetable;

pub use beer::{pack_rebate, BeerPackDiscount};
pub use bread::{free_loaves, BreadFreshnessDiscount};
pub use vegetable::{weight_tier, VegetableWeightDiscount};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::OrderLine;

// =============================================================================
// Pricing Context
// =============================================================================

/// Request-wide facts a rule may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingContext {
    /// The calendar date the order is priced on. Bread age is measured
    /// against it.
    pub today: NaiveDate,
}

impl PricingContext {
    pub fn new(today: NaiveDate) -> Self {
        PricingContext { today }
    }
}

// =============================================================================
// Strategy Trait
// =============================================================================

/// A discount policy.
///
/// Implementations must return [`Money::zero`] for lines they do not apply
/// to, and must give the same answer for any ordering of `lines`. An error
/// means the discount could not be represented, e.g.
/// [`CoreError::AmountOutOfRange`](crate::error::CoreError::AmountOutOfRange).
pub trait DiscountStrategy {
    /// Stable rule name, e.g. `"BeerPackDiscount"`.
    fn name(&self) -> &'static str;

    /// Total discount this rule grants across `lines`.
    fn aggregate_discount(&self, lines: &[OrderLine], ctx: &PricingContext) -> CoreResult<Money>;

    /// Discount this rule grants to `line` evaluated in isolation.
    fn per_line_discount(&self, line: &OrderLine, ctx: &PricingContext) -> CoreResult<Money>;
}

// =============================================================================
// Rule Registry
// =============================================================================

/// The closed set of discount rules shipped with Grocer.
///
/// ## Example
/// ```rust
/// use grocer_core::discount::{DiscountRule, DiscountStrategy};
///
/// let names: Vec<&str> = DiscountRule::standard().iter().map(|r| r.name()).collect();
/// assert_eq!(names, ["BeerPackDiscount", "BreadFreshnessDiscount", "VegetableWeightDiscount"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountRule {
    BeerPack,
    BreadFreshness,
    VegetableWeight,
}

impl DiscountRule {
    /// Every rule, in evaluation order.
    pub fn standard() -> Vec<DiscountRule> {
        vec![
            DiscountRule::BeerPack,
            DiscountRule::BreadFreshness,
            DiscountRule::VegetableWeight,
        ]
    }

    /// Whether the engine pools this rule over the whole order and prorates
    /// the result, instead of asking it line by line.
    pub fn is_order_wide(&self) -> bool {
        matches!(self, DiscountRule::VegetableWeight)
    }

    fn strategy(&self) -> &'static dyn DiscountStrategy {
        match self {
            DiscountRule::BeerPack => &BeerPackDiscount,
            DiscountRule::BreadFreshness => &BreadFreshnessDiscount,
            DiscountRule::VegetableWeight => &VegetableWeightDiscount,
        }
    }
}

impl DiscountStrategy for DiscountRule {
    fn name(&self) -> &'static str {
        self.strategy().name()
    }

    fn aggregate_discount(&self, lines: &[OrderLine], ctx: &PricingContext) -> CoreResult<Money> {
        self.strategy().aggregate_discount(lines, ctx)
    }

    fn per_line_discount(&self, line: &OrderLine, ctx: &PricingContext) -> CoreResult<Money> {
        self.strategy().per_line_discount(line, ctx)
    }
}

impl fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
