//! Bread freshness discount.
//!
//! Day-old bread is sold at full price; older bread gives free loaves.
//!
//! ```text
//! age (days)   free loaves
//! ──────────   ───────────────────
//! ≤ 1          0
//! 2..=3        quantity / 2
//! 4..=6        (quantity / 3) × 2
//! > 6          0  (rejected before pricing anyway)
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, OrderLine};

use super::{DiscountStrategy, PricingContext};

/// Number of free loaves for `quantity` loaves that are `age_days` old.
pub fn free_loaves(age_days: i64, quantity: u32) -> u32 {
    match age_days {
        2..=3 => quantity / 2,
        4..=6 => quantity / 3 * 2,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BreadFreshnessDiscount;

impl DiscountStrategy for BreadFreshnessDiscount {
    fn name(&self) -> &'static str {
        "BreadFreshnessDiscount"
    }

    /// No pooling: the sum of each line's own discount.
    fn aggregate_discount(&self, lines: &[OrderLine], ctx: &PricingContext) -> CoreResult<Money> {
        let discounts = lines
            .iter()
            .map(|line| self.per_line_discount(line, ctx))
            .collect::<CoreResult<Vec<Money>>>()?;
        Money::checked_sum(discounts).ok_or_else(|| CoreError::out_of_range("bread discount"))
    }

    fn per_line_discount(&self, line: &OrderLine, ctx: &PricingContext) -> CoreResult<Money> {
        match &line.item {
            CatalogItem::Bread(bread) => {
                let free = free_loaves(bread.age_in_days(ctx.today), line.quantity);
                bread
                    .unit_price
                    .checked_mul_quantity(free)
                    .ok_or_else(|| CoreError::out_of_range(format!("discount on {}", bread.name)))
            }
            _ => Ok(Money::zero()),
        }
    }
}
