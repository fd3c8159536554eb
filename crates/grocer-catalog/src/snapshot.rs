//! # Catalog Snapshots
//!
//! The whole catalog as one JSON document.
//!
//! ```json
//! {
//!   "beers":      [{ "id": "…", "name": "Duvel", "originCountry": "BELGIUM", "unitPrice": "5.00" }],
//!   "breads":     [{ "id": "…", "name": "Rye", "bakingDate": "2024-03-08", "unitPrice": "3.50" }],
//!   "vegetables": [{ "id": "…", "name": "Carrot", "pricePer100Grams": "1.00" }]
//! }
//! ```
//!
//! Ids may be omitted in hand-written files; they are assigned on import.
//!
//! A snapshot is also what the pricing engine reads from: the checkout
//! prefetches the requested items into one with
//! [`Catalog::prefetch`](crate::Catalog::prefetch), and the engine resolves
//! ids against it without touching the database.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use grocer_core::{Beer, Bread, CatalogLookup, CoreError, CoreResult, ItemCategory, Vegetable};

use crate::error::CatalogResult;

/// Catalog records grouped by category and sorted by name.
///
/// Serves as the export format, the "all prices" view and the engine's
/// in-memory lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub beers: Vec<Beer>,
    #[serde(default)]
    pub breads: Vec<Bread>,
    #[serde(default)]
    pub vegetables: Vec<Vegetable>,
}

impl CatalogSnapshot {
    pub fn item_count(&self) -> usize {
        self.beers.len() + self.breads.len() + self.vegetables.len()
    }

    /// Reads and parses a snapshot file.
    pub fn read_from(path: &Path) -> CatalogResult<Self> {
        let raw = fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            items = snapshot.item_count(),
            "Catalog snapshot read"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(
            path = %path.display(),
            items = self.item_count(),
            "Catalog snapshot written"
        );
        Ok(())
    }
}

impl CatalogLookup for CatalogSnapshot {
    fn lookup_beer(&self, id: &str) -> CoreResult<Beer> {
        self.beers
            .iter()
            .find(|beer| beer.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(ItemCategory::Beer, id))
    }

    fn lookup_bread(&self, id: &str) -> CoreResult<Bread> {
        self.breads
            .iter()
            .find(|bread| bread.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(ItemCategory::Bread, id))
    }

    fn lookup_vegetable(&self, id: &str) -> CoreResult<Vegetable> {
        self.vegetables
            .iter()
            .find(|vegetable| vegetable.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(ItemCategory::Vegetable, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use grocer_core::{Country, Money};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("grocer-snapshot-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_parse_hand_written_snapshot() {
        let json = r#"{
            "beers": [{ "name": "Duvel", "originCountry": "belgium", "unitPrice": "5.00" }],
            "vegetables": [{ "pricePer100Grams": 1.5 }]
        }"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.beers[0].origin_country, Country::Belgium);
        assert_eq!(snapshot.beers[0].id, "");
        assert!(snapshot.breads.is_empty());
        assert_eq!(snapshot.vegetables[0].price_per_100_grams, Money::from_cents(150));
        assert_eq!(snapshot.item_count(), 2);
    }

    #[test]
    fn test_write_then_read_file() {
        let path = temp_path("catalog.json");
        let snapshot = CatalogSnapshot {
            beers: vec![Beer {
                id: "beer-1".to_string(),
                name: "Duvel".to_string(),
                origin_country: Country::Belgium,
                unit_price: Money::from_cents(500),
            }],
            ..CatalogSnapshot::default()
        };

        snapshot.write_to(&path).unwrap();
        assert_eq!(CatalogSnapshot::read_from(&path).unwrap(), snapshot);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_lookup_by_category() {
        let snapshot = CatalogSnapshot {
            vegetables: vec![Vegetable {
                id: "veg-1".to_string(),
                name: "Carrot".to_string(),
                price_per_100_grams: Money::from_cents(100),
            }],
            ..CatalogSnapshot::default()
        };

        assert_eq!(snapshot.lookup_vegetable("veg-1").unwrap().name, "Carrot");
        assert!(matches!(
            snapshot.lookup_beer("veg-1"),
            Err(CoreError::ItemNotFound { category: ItemCategory::Beer, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_snapshot_error() {
        let err = CatalogSnapshot::read_from(&temp_path("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Snapshot(_)));
    }
}
