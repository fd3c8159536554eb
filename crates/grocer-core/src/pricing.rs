//! # Gross Price Calculator
//!
//! Undiscounted line values.
//!
//! ```text
//! Beer, Bread  →  unit_price × quantity
//! Vegetable    →  price_per_100_grams × (grams / 100)
//! ```
//!
//! Nothing is rounded here. 150 g of a vegetable at 1.25 per 100 g is
//! exactly 1.875.
//!
//! Prices are only required to be positive, so a product can exceed what a
//! decimal holds; that surfaces as [`CoreError::AmountOutOfRange`].

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, OrderLine};

/// Gross value of `quantity` units (or grams) of `item`.
pub fn line_gross(item: &CatalogItem, quantity: u32) -> CoreResult<Money> {
    let gross = match item {
        CatalogItem::Beer(beer) => beer.unit_price.checked_mul_quantity(quantity),
        CatalogItem::Bread(bread) => bread.unit_price.checked_mul_quantity(quantity),
        CatalogItem::Vegetable(vegetable) => vegetable
            .price_per_100_grams
            .checked_scale(Decimal::from(quantity) / Decimal::ONE_HUNDRED),
    };
    gross.ok_or_else(|| CoreError::out_of_range(format!("gross of {} x {}", quantity, item.name())))
}

/// Sum of the gross values of `lines`.
pub fn gross_total(lines: &[OrderLine]) -> CoreResult<Money> {
    let grosses = lines
        .iter()
        .map(OrderLine::gross)
        .collect::<CoreResult<Vec<Money>>>()?;
    Money::checked_sum(grosses).ok_or_else(|| CoreError::out_of_range("order gross total"))
}

impl OrderLine {
    /// Gross value of this line.
    pub fn gross(&self) -> CoreResult<Money> {
        line_gross(&self.item, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Beer, Bread, Country, Vegetable};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn beer(price: Decimal) -> CatalogItem {
        CatalogItem::Beer(Beer {
            id: "beer".to_string(),
            name: "Duvel".to_string(),
            origin_country: Country::Belgium,
            unit_price: Money::new(price),
        })
    }

    fn vegetable(price_per_100: Decimal) -> CatalogItem {
        CatalogItem::Vegetable(Vegetable {
            id: "veg".to_string(),
            name: "Carrot".to_string(),
            price_per_100_grams: Money::new(price_per_100),
        })
    }

    #[test]
    fn test_unit_priced_items() {
        assert_eq!(line_gross(&beer(dec!(5.0)), 6).unwrap().amount(), dec!(30));

        let bread = CatalogItem::Bread(Bread {
            id: "bread".to_string(),
            name: "Rye".to_string(),
            baking_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            unit_price: Money::new(dec!(2.75)),
        });
        assert_eq!(line_gross(&bread, 4).unwrap().amount(), dec!(11));
    }

    #[test]
    fn test_vegetable_priced_per_100_grams() {
        assert_eq!(line_gross(&vegetable(dec!(1.5)), 300).unwrap().amount(), dec!(4.5));
        assert_eq!(line_gross(&vegetable(dec!(1.25)), 150).unwrap().amount(), dec!(1.875));
        assert_eq!(line_gross(&vegetable(dec!(2)), 1).unwrap().amount(), dec!(0.02));
    }

    #[test]
    fn test_zero_quantity_is_zero() {
        assert!(line_gross(&beer(dec!(5)), 0).unwrap().is_zero());
        assert!(line_gross(&vegetable(dec!(5)), 0).unwrap().is_zero());
    }

    #[test]
    fn test_gross_total() {
        let lines = vec![
            OrderLine::new(beer(dec!(5.0)), 6),
            OrderLine::new(vegetable(dec!(1.5)), 300),
        ];
        assert_eq!(gross_total(&lines).unwrap().amount(), dec!(34.5));
        assert_eq!(lines[1].gross().unwrap().amount(), dec!(4.5));
        assert!(gross_total(&[]).unwrap().is_zero());
    }

    #[test]
    fn test_gross_out_of_range_is_an_error() {
        let huge_beer = beer(dec!(100000000000000000000));
        let err = line_gross(&huge_beer, 4_000_000_000).unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange(_)));

        let huge_vegetable = vegetable(Decimal::MAX);
        assert!(line_gross(&huge_vegetable, 4_000_000).is_err());

        let lines = vec![
            OrderLine::new(vegetable(Decimal::MAX), 100),
            OrderLine::new(vegetable(Decimal::MAX), 100),
        ];
        assert!(matches!(gross_total(&lines), Err(CoreError::AmountOutOfRange(_))));
    }
}
