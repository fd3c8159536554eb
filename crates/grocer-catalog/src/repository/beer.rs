//! # Beer Repository
//!
//! ## Intake Rules
//! - Name required, at most 200 characters
//! - Unit price strictly positive
//! - Names are unique, ignoring case ("duvel" clashes with "Duvel"); the
//!   `beers.name` column is `COLLATE NOCASE UNIQUE`

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use grocer_core::validation::{validate_item_name, validate_price};
use grocer_core::{Beer, Country, ItemCategory, Money};

use super::{id_or_new, new_id, parse_price, price_column};
use crate::error::{CatalogError, CatalogResult};

/// Fields a caller supplies to create or replace a beer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDraft {
    pub name: String,
    pub origin_country: Country,
    pub unit_price: Money,
}

impl BeerDraft {
    pub fn new(name: impl Into<String>, origin_country: impl Into<Country>, unit_price: Money) -> Self {
        BeerDraft {
            name: name.into(),
            origin_country: origin_country.into(),
            unit_price,
        }
    }

    fn into_beer(self, id: String) -> Beer {
        Beer {
            id,
            name: self.name.trim().to_string(),
            origin_country: self.origin_country,
            unit_price: self.unit_price,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BeerRow {
    id: String,
    name: String,
    origin_country: String,
    unit_price: String,
}

impl BeerRow {
    fn into_beer(self) -> CatalogResult<Beer> {
        let unit_price = parse_price(ItemCategory::Beer, &self.id, &self.unit_price)?;
        Ok(Beer {
            id: self.id,
            name: self.name,
            origin_country: Country::from(self.origin_country),
            unit_price,
        })
    }
}

/// Repository for beers.
///
/// ## Usage
/// ```rust,ignore
/// let repo = catalog.beers();
/// let duvel = repo
///     .insert(BeerDraft::new("Duvel", Country::Belgium, Money::from_cents(500)))
///     .await?;
/// assert_eq!(repo.get_by_id(&duvel.id).await?, Some(duvel));
/// ```
#[derive(Debug, Clone)]
pub struct BeerRepository {
    pool: SqlitePool,
}

impl BeerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BeerRepository { pool }
    }

    /// Inserts a new beer under a fresh id.
    ///
    /// ## Returns
    /// * `Ok(Beer)` - Stored beer with its generated id
    /// * `Err(CatalogError::Duplicate)` - Name already taken
    /// * `Err(CatalogError::Validation)` - Blank name or non-positive price
    pub async fn insert(&self, draft: BeerDraft) -> CatalogResult<Beer> {
        let beer = draft.into_beer(new_id());
        debug!(name = %beer.name, "Inserting beer");
        validate(&beer)?;
        insert_row(&self.pool, &beer).await?;
        Ok(beer)
    }

    /// Replaces every field of an existing beer.
    ///
    /// ## Returns
    /// * `Err(CatalogError::NotFound)` - No beer with this id
    /// * `Err(CatalogError::Duplicate)` - Another beer already has the name
    pub async fn update(&self, id: &str, draft: BeerDraft) -> CatalogResult<Beer> {
        debug!(id = %id, "Updating beer");
        let beer = draft.into_beer(id.to_string());
        validate(&beer)?;

        let result = sqlx::query(
            r#"
            UPDATE beers SET
                name = ?2,
                origin_country = ?3,
                unit_price = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&beer.id)
        .bind(&beer.name)
        .bind(beer.origin_country.as_str())
        .bind(price_column(beer.unit_price))
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::from(e).with_duplicate_value(&beer.id, &beer.name))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Beer, id));
        }
        Ok(beer)
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        debug!(id = %id, "Deleting beer");
        let result = sqlx::query("DELETE FROM beers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Beer, id));
        }
        Ok(())
    }

    /// ## Returns
    /// * `Ok(Some(Beer))` - Beer found
    /// * `Ok(None)` - Beer not found
    pub async fn get_by_id(&self, id: &str) -> CatalogResult<Option<Beer>> {
        sqlx::query_as::<_, BeerRow>(
            r#"
            SELECT id, name, origin_country, unit_price
            FROM beers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BeerRow::into_beer)
        .transpose()
    }

    /// All beers, sorted by name ignoring case.
    pub async fn list(&self) -> CatalogResult<Vec<Beer>> {
        sqlx::query_as::<_, BeerRow>(
            r#"
            SELECT id, name, origin_country, unit_price
            FROM beers
            ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(BeerRow::into_beer)
        .collect()
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn validate(beer: &Beer) -> CatalogResult<()> {
    validate_item_name(&beer.name)?;
    validate_price("unitPrice", beer.unit_price)?;
    Ok(())
}

/// Normalizes and validates a snapshot record, keeping its id.
pub(crate) fn restore_record(beer: Beer) -> CatalogResult<Beer> {
    let id = id_or_new(&beer.id);
    let beer = BeerDraft {
        name: beer.name,
        origin_country: beer.origin_country,
        unit_price: beer.unit_price,
    }
    .into_beer(id);
    validate(&beer)?;
    Ok(beer)
}

pub(crate) async fn insert_row<'e, E>(executor: E, beer: &Beer) -> CatalogResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO beers (id, name, origin_country, unit_price)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&beer.id)
    .bind(&beer.name)
    .bind(beer.origin_country.as_str())
    .bind(price_column(beer.unit_price))
    .execute(executor)
    .await
    .map_err(|e| CatalogError::from(e).with_duplicate_value(&beer.id, &beer.name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, CatalogConfig};
    use grocer_core::ValidationError;

    async fn repo() -> BeerRepository {
        Catalog::open(CatalogConfig::in_memory()).await.unwrap().beers()
    }

    fn draft(name: &str) -> BeerDraft {
        BeerDraft::new(name, Country::Belgium, Money::from_cents(500))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let beer = repo.insert(draft("  Duvel ")).await.unwrap();

        assert_eq!(beer.name, "Duvel");
        assert!(!beer.id.is_empty());
        assert_eq!(repo.get_by_id(&beer.id).await.unwrap(), Some(beer));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_country_survives_storage() {
        let repo = repo().await;
        let beer = repo
            .insert(BeerDraft::new("Guinness", "ireland", Money::from_cents(450)))
            .await
            .unwrap();
        let stored = repo.get_by_id(&beer.id).await.unwrap().unwrap();
        assert_eq!(stored.origin_country, Country::Other("IRELAND".to_string()));
    }

    #[tokio::test]
    async fn test_names_unique_ignoring_case() {
        let repo = repo().await;
        repo.insert(draft("Duvel")).await.unwrap();

        let err = repo.insert(draft("DUVEL")).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Duplicate { ref field, ref value } if field == "name" && value == "DUVEL"
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_name() {
        let repo = repo().await;
        let beer = repo.insert(draft("Duvel")).await.unwrap();

        let updated = repo
            .update(&beer.id, BeerDraft::new("duvel", Country::Germany, Money::from_cents(450)))
            .await
            .unwrap();
        assert_eq!(updated.origin_country, Country::Germany);
        assert_eq!(
            repo.get_by_id(&beer.id).await.unwrap().unwrap().unit_price,
            Money::from_cents(450)
        );
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_name() {
        let repo = repo().await;
        repo.insert(draft("Duvel")).await.unwrap();
        let chimay = repo.insert(draft("Chimay")).await.unwrap();

        let err = repo.update(&chimay.id, draft("duvel")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = repo().await;
        let err = repo.update("missing", draft("Duvel")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: ItemCategory::Beer, .. }));
    }

    #[tokio::test]
    async fn test_intake_rules() {
        let repo = repo().await;

        let err = repo.insert(draft(" ")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ValidationError::Required { .. })));

        let err = repo
            .insert(BeerDraft::new("Free Beer", Country::Belgium, Money::zero()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ValidationError::MustBePositive { .. })));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let beer = repo.insert(draft("Duvel")).await.unwrap();

        repo.delete(&beer.id).await.unwrap();
        assert_eq!(repo.get_by_id(&beer.id).await.unwrap(), None);
        assert!(matches!(repo.delete(&beer.id).await, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = repo().await;
        repo.insert(draft("Westmalle")).await.unwrap();
        repo.insert(draft("chimay")).await.unwrap();
        repo.insert(draft("Duvel")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["chimay", "Duvel", "Westmalle"]);
    }

    #[tokio::test]
    async fn test_corrupt_price_is_reported() {
        let repo = repo().await;
        let beer = repo.insert(draft("Duvel")).await.unwrap();
        sqlx::query("UPDATE beers SET unit_price = 'five' WHERE id = ?1")
            .bind(&beer.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.get_by_id(&beer.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { entity: ItemCategory::Beer, .. }));
    }
}
