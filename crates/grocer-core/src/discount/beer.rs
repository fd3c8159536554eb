//! Beer pack discount.
//!
//! Bottles from the same origin country form packs of six; every full pack
//! earns a flat rebate that depends on the country. Partial packs earn
//! nothing.

use std::collections::HashMap;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CatalogItem, Country, OrderLine};
use crate::BEER_PACK_SIZE;

use super::{DiscountStrategy, PricingContext};

/// Rebate per full pack for beers from `country`.
///
/// ```text
/// BELGIUM      3.00
/// NETHERLANDS  2.00
/// GERMANY      4.00
/// other        0.00
/// ```
pub fn pack_rebate(country: &Country) -> Money {
    match country {
        Country::Belgium => Money::from_cents(300),
        Country::Netherlands => Money::from_cents(200),
        Country::Germany => Money::from_cents(400),
        Country::Other(_) => Money::zero(),
    }
}

fn full_packs(quantity: u64) -> u32 {
    u32::try_from(quantity / u64::from(BEER_PACK_SIZE)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BeerPackDiscount;

impl DiscountStrategy for BeerPackDiscount {
    fn name(&self) -> &'static str {
        "BeerPackDiscount"
    }

    /// Pools quantities of all beer lines sharing an origin country.
    fn aggregate_discount(&self, lines: &[OrderLine], _ctx: &PricingContext) -> CoreResult<Money> {
        let mut per_country: HashMap<&Country, u64> = HashMap::new();
        for line in lines {
            if let CatalogItem::Beer(beer) = &line.item {
                *per_country.entry(&beer.origin_country).or_default() += u64::from(line.quantity);
            }
        }

        Ok(per_country
            .into_iter()
            .map(|(country, quantity)| pack_rebate(country) * full_packs(quantity))
            .sum())
    }

    /// Only this line's own quantity counts; same-country siblings are ignored.
    fn per_line_discount(&self, line: &OrderLine, _ctx: &PricingContext) -> CoreResult<Money> {
        Ok(match &line.item {
            CatalogItem::Beer(beer) => {
                pack_rebate(&beer.origin_country) * full_packs(u64::from(line.quantity))
            }
            _ => Money::zero(),
        })
    }
}
