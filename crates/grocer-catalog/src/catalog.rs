//! # Catalog Operations
//!
//! Whole-catalog operations on top of the repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog::open(config)                                                  │
//! │       │                                                                 │
//! │       ├── catalog.import(path)      JSON → intake rules → one tx        │
//! │       │                                                                 │
//! │       ├── catalog.beers().insert(..)      management                    │
//! │       │                                                                 │
//! │       ├── catalog.prefetch(&requests)  → CatalogSnapshot                │
//! │       │        └── OrderPricingEngine::new(&snapshot)  (sync lookup)    │
//! │       │                                                                 │
//! │       └── catalog.export(path)      price_list() → JSON                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is synchronous and does no I/O, so orders are priced against
//! a prefetched snapshot rather than the database itself.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use grocer_core::{ItemCategory, OrderRequest};

use crate::error::CatalogResult;
use crate::pool::Catalog;
use crate::repository::{beer, bread, vegetable};
use crate::snapshot::CatalogSnapshot;

impl Catalog {
    /// Number of items across all three categories.
    pub async fn item_count(&self) -> CatalogResult<i64> {
        Ok(self.beers().count().await?
            + self.breads().count().await?
            + self.vegetables().count().await?)
    }

    /// Every beer, bread and vegetable with its price, each list sorted by
    /// name.
    pub async fn price_list(&self) -> CatalogResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            beers: self.beers().list().await?,
            breads: self.breads().list().await?,
            vegetables: self.vegetables().list().await?,
        })
    }

    /// Adds every record of `snapshot` in one transaction.
    ///
    /// Names, prices and uniqueness are checked; bread freshness is not,
    /// since admitted loaves keep ageing on the shelf. Nothing is written
    /// if any record is rejected.
    ///
    /// ## Returns
    /// * `Ok(n)` - Number of records added
    /// * `Err(CatalogError::Duplicate)` - Id or beer name already present
    /// * `Err(CatalogError::Validation)` - A record breaks an intake rule
    pub async fn import_snapshot(&self, snapshot: CatalogSnapshot) -> CatalogResult<usize> {
        let beers = snapshot
            .beers
            .into_iter()
            .map(beer::restore_record)
            .collect::<CatalogResult<Vec<_>>>()?;
        let breads = snapshot
            .breads
            .into_iter()
            .map(bread::restore_record)
            .collect::<CatalogResult<Vec<_>>>()?;
        let vegetables = snapshot
            .vegetables
            .into_iter()
            .map(vegetable::restore_record)
            .collect::<CatalogResult<Vec<_>>>()?;

        let mut tx = self.pool().begin().await?;
        for record in &beers {
            beer::insert_row(&mut *tx, record).await?;
        }
        for record in &breads {
            bread::insert_row(&mut *tx, record).await?;
        }
        for record in &vegetables {
            vegetable::insert_row(&mut *tx, record).await?;
        }
        tx.commit().await?;

        let added = beers.len() + breads.len() + vegetables.len();
        info!(
            beers = beers.len(),
            breads = breads.len(),
            vegetables = vegetables.len(),
            "Catalog snapshot imported"
        );
        Ok(added)
    }

    /// Reads a snapshot file and imports it.
    pub async fn import(&self, path: &Path) -> CatalogResult<usize> {
        self.import_snapshot(CatalogSnapshot::read_from(path)?).await
    }

    /// Writes the current contents to a snapshot file.
    pub async fn export(&self, path: &Path) -> CatalogResult<()> {
        self.price_list().await?.write_to(path)
    }

    /// Loads the items `requests` refer to.
    ///
    /// Unknown ids are left out rather than reported, so the engine raises
    /// `ItemNotFound` for the first one in request order.
    pub async fn prefetch(&self, requests: &[OrderRequest]) -> CatalogResult<CatalogSnapshot> {
        let mut seen: HashSet<(ItemCategory, &str)> = HashSet::new();
        let mut items = CatalogSnapshot::default();

        for request in requests {
            if !seen.insert((request.category, request.item_id.as_str())) {
                continue;
            }
            match request.category {
                ItemCategory::Beer => {
                    items.beers.extend(self.beers().get_by_id(&request.item_id).await?);
                }
                ItemCategory::Bread => {
                    items.breads.extend(self.breads().get_by_id(&request.item_id).await?);
                }
                ItemCategory::Vegetable => {
                    items
                        .vegetables
                        .extend(self.vegetables().get_by_id(&request.item_id).await?);
                }
            }
        }

        debug!(requested = seen.len(), found = items.item_count(), "Prefetched order items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CatalogError;
    use crate::repository::{BeerDraft, BreadDraft, VegetableDraft};
    use crate::{Catalog, CatalogConfig, CatalogSnapshot};
    use chrono::{Duration, NaiveDate};
    use grocer_core::{
        Beer, Bread, CoreError, Country, ItemCategory, Money, OrderPricingEngine, OrderRequest,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    async fn empty() -> Catalog {
        Catalog::open(CatalogConfig::in_memory()).await.unwrap()
    }

    async fn stocked() -> Catalog {
        let catalog = empty().await;
        catalog
            .beers()
            .insert(BeerDraft::new("Duvel", Country::Belgium, Money::from_cents(500)))
            .await
            .unwrap();
        catalog
            .breads()
            .insert_on(
                BreadDraft::new("White Bread", today() - Duration::days(3), Money::from_cents(500)),
                today(),
            )
            .await
            .unwrap();
        catalog
            .vegetables()
            .insert(VegetableDraft::new("Broccoli", Money::from_cents(150)))
            .await
            .unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_prices_an_order_from_prefetched_items() {
        let catalog = stocked().await;
        let prices = catalog.price_list().await.unwrap();
        let requests = vec![
            OrderRequest::new(ItemCategory::Beer, prices.beers[0].id.clone(), 6),
            OrderRequest::new(ItemCategory::Bread, prices.breads[0].id.clone(), 4),
            OrderRequest::new(ItemCategory::Vegetable, prices.vegetables[0].id.clone(), 300),
            OrderRequest::new(ItemCategory::Beer, prices.beers[0].id.clone(), 1),
        ];

        let items = catalog.prefetch(&requests).await.unwrap();
        assert_eq!(items.item_count(), 3);

        let summary = OrderPricingEngine::new(&items)
            .price_order_on(&requests, today())
            .unwrap();
        assert_eq!(summary.total.to_string(), "46.19");
    }

    #[tokio::test]
    async fn test_prefetch_leaves_out_unknown_ids() {
        let catalog = stocked().await;
        let beer_id = catalog.price_list().await.unwrap().beers[0].id.clone();
        let requests = vec![
            OrderRequest::new(ItemCategory::Beer, beer_id.clone(), 6),
            OrderRequest::new(ItemCategory::Vegetable, beer_id, 100),
        ];

        let items = catalog.prefetch(&requests).await.unwrap();
        assert_eq!(items.beers.len(), 1);
        assert!(items.vegetables.is_empty());

        let err = OrderPricingEngine::new(&items)
            .price_order_on(&requests, today())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ItemNotFound { category: ItemCategory::Vegetable, .. }
        ));
    }

    #[tokio::test]
    async fn test_export_then_import_keeps_ids() {
        let source = stocked().await;
        let snapshot = source.price_list().await.unwrap();

        let target = empty().await;
        assert_eq!(target.import_snapshot(snapshot.clone()).await.unwrap(), 3);
        assert_eq!(target.price_list().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_import_keeps_aged_bread() {
        let catalog = empty().await;
        let snapshot = CatalogSnapshot {
            breads: vec![Bread {
                id: String::new(),
                name: "Old Loaf".to_string(),
                baking_date: today() - Duration::days(30),
                unit_price: Money::from_cents(300),
            }],
            ..CatalogSnapshot::default()
        };

        catalog.import_snapshot(snapshot).await.unwrap();
        let breads = catalog.breads().list().await.unwrap();
        assert_eq!(breads.len(), 1);
        assert!(!breads[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_import_writes_nothing() {
        let catalog = empty().await;
        let beer = |id: &str, name: &str| Beer {
            id: id.to_string(),
            name: name.to_string(),
            origin_country: Country::Belgium,
            unit_price: Money::from_cents(500),
        };
        let snapshot = CatalogSnapshot {
            beers: vec![beer("a", "Chimay"), beer("b", "Duvel"), beer("c", "duvel")],
            ..CatalogSnapshot::default()
        };

        let err = catalog.import_snapshot(snapshot).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Duplicate { ref field, ref value } if field == "name" && value == "duvel"
        ));
        assert_eq!(catalog.item_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_export_and_import_files() {
        let dir = std::env::temp_dir().join(format!("grocer-catalog-{}", uuid::Uuid::new_v4()));
        let path = dir.join("catalog.json");

        let source = stocked().await;
        source.export(&path).await.unwrap();

        let target = empty().await;
        target.import(&path).await.unwrap();
        assert_eq!(
            target.price_list().await.unwrap(),
            source.price_list().await.unwrap()
        );
        assert_eq!(target.item_count().await.unwrap(), 3);

        let _ = std::fs::remove_dir_all(dir);
    }
}
