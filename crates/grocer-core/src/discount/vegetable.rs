//! Vegetable weight discount.
//!
//! The grams of every vegetable line in the order are added up, and that
//! single pooled weight picks one rate for all of them.
//!
//! ```text
//! pooled weight      rate
//! ─────────────────  ────
//! 0 g                 0%
//! 1 ..= 100 g         5%
//! 101 ..= 500 g       7%
//! > 500 g            10%
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, DiscountRate, OrderLine};

use super::{DiscountStrategy, PricingContext};

/// Discount rate for a pooled vegetable weight in grams.
pub fn weight_tier(total_grams: u64) -> DiscountRate {
    match total_grams {
        0 => DiscountRate::zero(),
        1..=100 => DiscountRate::from_bps(500),
        101..=500 => DiscountRate::from_bps(700),
        _ => DiscountRate::from_bps(1000),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VegetableWeightDiscount;

impl DiscountStrategy for VegetableWeightDiscount {
    fn name(&self) -> &'static str {
        "VegetableWeightDiscount"
    }

    /// `Σ gross × rate` over the vegetable lines, with one rate chosen by
    /// their combined weight.
    fn aggregate_discount(&self, lines: &[OrderLine], _ctx: &PricingContext) -> CoreResult<Money> {
        let vegetables: Vec<&OrderLine> = lines.iter().filter(|l| l.is_vegetable()).collect();
        let total_grams: u64 = vegetables.iter().map(|l| u64::from(l.quantity)).sum();
        let rate = weight_tier(total_grams);

        let discounts = vegetables
            .iter()
            .map(|line| -> CoreResult<Money> { Ok(line.gross()?.apply_rate(rate)) })
            .collect::<CoreResult<Vec<Money>>>()?;
        Money::checked_sum(discounts).ok_or_else(|| CoreError::out_of_range("vegetable discount"))
    }

    /// The line's own weight picks its tier.
    fn per_line_discount(&self, line: &OrderLine, ctx: &PricingContext) -> CoreResult<Money> {
        match &line.item {
            CatalogItem::Vegetable(_) => self.aggregate_discount(std::slice::from_ref(line), ctx),
            _ => Ok(Money::zero()),
        }
    }
}
