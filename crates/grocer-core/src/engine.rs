//! # Order Pricing Engine
//!
//! Turns a list of raw order requests into a priced [`OrderSummary`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [OrderRequest]                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. RESOLVE    CatalogLookup::lookup_*(id)  ──► [OrderLine]             │
//! │       │        (ItemNotFound aborts the request)                        │
//! │       ▼                                                                 │
//! │  2. VALIDATE   every bread line: age ≤ 6 days                           │
//! │       │        (BreadTooOld aborts the request)                         │
//! │       ▼                                                                 │
//! │  3. PRICE      beer, bread:  net = gross − Σ per_line_discount          │
//! │       │        vegetable:    net = gross − pooled × gross/Σ veg gross   │
//! │       ▼                                                                 │
//! │  4. AGGREGATE  total = round_half_up(Σ net, 2)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderSummary { lines (request order), total }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine keeps no state between requests. Every pooled value is
//! recomputed from the lines of the current order.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::discount::{DiscountRule, DiscountStrategy, PricingContext};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    Beer, Bread, CatalogItem, ItemCategory, LineSummary, OrderLine, OrderRequest, OrderSummary,
    Vegetable,
};
use crate::validation::validate_bread_freshness;

// =============================================================================
// Catalog Lookup
// =============================================================================

/// Read access to catalog master data.
///
/// Implementations return [`CoreError::ItemNotFound`] for unknown ids. The
/// engine propagates whatever error it receives without retrying.
pub trait CatalogLookup {
    fn lookup_beer(&self, id: &str) -> CoreResult<Beer>;
    fn lookup_bread(&self, id: &str) -> CoreResult<Bread>;
    fn lookup_vegetable(&self, id: &str) -> CoreResult<Vegetable>;

    /// Resolves any category.
    fn lookup(&self, category: ItemCategory, id: &str) -> CoreResult<CatalogItem> {
        Ok(match category {
            ItemCategory::Beer => self.lookup_beer(id)?.into(),
            ItemCategory::Bread => self.lookup_bread(id)?.into(),
            ItemCategory::Vegetable => self.lookup_vegetable(id)?.into(),
        })
    }
}

impl<T: CatalogLookup + ?Sized> CatalogLookup for &T {
    fn lookup_beer(&self, id: &str) -> CoreResult<Beer> {
        (**self).lookup_beer(id)
    }

    fn lookup_bread(&self, id: &str) -> CoreResult<Bread> {
        (**self).lookup_bread(id)
    }

    fn lookup_vegetable(&self, id: &str) -> CoreResult<Vegetable> {
        (**self).lookup_vegetable(id)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices orders against a catalog with a fixed set of discount rules.
///
/// ## Example
/// ```rust,ignore
/// let engine = OrderPricingEngine::new(&catalog);
/// let summary = engine.price_order(&requests)?;
/// println!("TOTAL {}", summary.total);
/// ```
#[derive(Debug, Clone)]
pub struct OrderPricingEngine<L> {
    lookup: L,
    rules: Vec<DiscountRule>,
}

impl<L: CatalogLookup> OrderPricingEngine<L> {
    /// Creates an engine with [`DiscountRule::standard`].
    pub fn new(lookup: L) -> Self {
        Self::with_rules(lookup, DiscountRule::standard())
    }

    /// Creates an engine with an explicit rule list.
    ///
    /// Without [`DiscountRule::VegetableWeight`] vegetable lines are priced
    /// at gross.
    pub fn with_rules(lookup: L, rules: Vec<DiscountRule>) -> Self {
        OrderPricingEngine { lookup, rules }
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Prices `requests` as of the local calendar date.
    pub fn price_order(&self, requests: &[OrderRequest]) -> CoreResult<OrderSummary> {
        self.price_order_on(requests, Local::now().date_naive())
    }

    /// Prices `requests` as of `today`.
    ///
    /// Fails without a partial result if an id is unknown, a bread line is
    /// more than six days old, or an amount grows past what a decimal holds.
    pub fn price_order_on(
        &self,
        requests: &[OrderRequest],
        today: NaiveDate,
    ) -> CoreResult<OrderSummary> {
        let lines = self.resolve(requests)?;
        validate_freshness(&lines, today)?;

        let ctx = PricingContext::new(today);
        let priced = price_lines(&lines, &self.rules, &ctx)?;
        let summary = aggregate(priced)?;

        info!(
            lines = summary.lines.len(),
            total = %summary.total,
            "Order priced"
        );
        Ok(summary)
    }

    /// Step 1: fetches every requested item, keeping request order.
    pub fn resolve(&self, requests: &[OrderRequest]) -> CoreResult<Vec<OrderLine>> {
        requests
            .iter()
            .map(|request| -> CoreResult<OrderLine> {
                let item = self.lookup.lookup(request.category, &request.item_id)?;
                debug!(
                    category = %request.category,
                    id = %request.item_id,
                    quantity = request.quantity,
                    "Resolved order line"
                );
                Ok(OrderLine::new(item, request.quantity))
            })
            .collect()
    }
}

// =============================================================================
// Pipeline Steps
// =============================================================================

/// Step 2: rejects the order if any bread line is past its sell-by window.
pub fn validate_freshness(lines: &[OrderLine], today: NaiveDate) -> CoreResult<()> {
    for line in lines {
        if let CatalogItem::Bread(bread) = &line.item {
            if let Err(err) = validate_bread_freshness(bread, today) {
                warn!(bread = %bread.name, id = %bread.id, "Rejected stale bread");
                return Err(CoreError::Validation(err));
            }
        }
    }
    Ok(())
}

/// Step 3: computes gross, discount and net for every line.
pub fn price_lines(
    lines: &[OrderLine],
    rules: &[DiscountRule],
    ctx: &PricingContext,
) -> CoreResult<Vec<LineSummary>> {
    let vegetables: Vec<OrderLine> = lines.iter().filter(|l| l.is_vegetable()).cloned().collect();
    let pools = rules
        .iter()
        .filter(|rule| rule.is_order_wide())
        .map(|rule| rule.aggregate_discount(&vegetables, ctx))
        .collect::<CoreResult<Vec<Money>>>()?;
    let pooled_vegetable_discount = Money::checked_sum(pools)
        .ok_or_else(|| CoreError::out_of_range("pooled vegetable discount"))?;
    let vegetable_gross = crate::pricing::gross_total(&vegetables)?;

    lines
        .iter()
        .map(|line| -> CoreResult<LineSummary> {
            let gross = line.gross()?;
            let discount = if line.is_vegetable() {
                pooled_vegetable_discount.prorate(gross, vegetable_gross)
            } else {
                let discounts = rules
                    .iter()
                    .filter(|rule| !rule.is_order_wide())
                    .map(|rule| rule.per_line_discount(line, ctx))
                    .collect::<CoreResult<Vec<Money>>>()?;
                Money::checked_sum(discounts)
                    .ok_or_else(|| CoreError::out_of_range(format!("discount on {}", line.description())))?
            };
            let net = gross - discount;
            debug!(
                line = %line.description(),
                gross = %gross.amount(),
                discount = %discount.amount(),
                net = %net.amount(),
                "Priced order line"
            );
            Ok(LineSummary {
                description: line.description(),
                gross,
                discount,
                net,
            })
        })
        .collect()
}

/// Step 4: sums line nets and rounds half up to cents.
///
/// Also checks that the gross and discount totals a receipt shows can be
/// summed, so [`OrderSummary::gross_total`] never overflows.
pub fn aggregate(lines: Vec<LineSummary>) -> CoreResult<OrderSummary> {
    let total = Money::checked_sum(lines.iter().map(|line| line.net))
        .ok_or_else(|| CoreError::out_of_range("order total"))?;
    Money::checked_sum(lines.iter().map(|line| line.gross))
        .ok_or_else(|| CoreError::out_of_range("order gross total"))?;
    Money::checked_sum(lines.iter().map(|line| line.discount))
        .ok_or_else(|| CoreError::out_of_range("order discount total"))?;

    Ok(OrderSummary {
        lines,
        total: total.round_to_cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
