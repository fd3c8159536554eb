//! # Vegetable Repository
//!
//! Vegetables are the lenient category: the name may be empty and need not
//! be unique. The price per 100 grams must still be positive.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use grocer_core::validation::{validate_optional_name, validate_price};
use grocer_core::{ItemCategory, Money, Vegetable};

use super::{id_or_new, new_id, parse_price, price_column};
use crate::error::{CatalogError, CatalogResult};

/// Fields a caller supplies to create or replace a vegetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VegetableDraft {
    #[serde(default)]
    pub name: String,
    pub price_per_100_grams: Money,
}

impl VegetableDraft {
    pub fn new(name: impl Into<String>, price_per_100_grams: Money) -> Self {
        VegetableDraft {
            name: name.into(),
            price_per_100_grams,
        }
    }

    fn into_vegetable(self, id: String) -> Vegetable {
        Vegetable {
            id,
            name: self.name.trim().to_string(),
            price_per_100_grams: self.price_per_100_grams,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VegetableRow {
    id: String,
    name: String,
    price_per_100_grams: String,
}

impl VegetableRow {
    fn into_vegetable(self) -> CatalogResult<Vegetable> {
        let price_per_100_grams =
            parse_price(ItemCategory::Vegetable, &self.id, &self.price_per_100_grams)?;
        Ok(Vegetable {
            id: self.id,
            name: self.name,
            price_per_100_grams,
        })
    }
}

/// Repository for vegetables.
#[derive(Debug, Clone)]
pub struct VegetableRepository {
    pool: SqlitePool,
}

impl VegetableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        VegetableRepository { pool }
    }

    pub async fn insert(&self, draft: VegetableDraft) -> CatalogResult<Vegetable> {
        let vegetable = draft.into_vegetable(new_id());
        debug!(name = %vegetable.name, "Inserting vegetable");
        validate(&vegetable)?;
        insert_row(&self.pool, &vegetable).await?;
        Ok(vegetable)
    }

    pub async fn update(&self, id: &str, draft: VegetableDraft) -> CatalogResult<Vegetable> {
        debug!(id = %id, "Updating vegetable");
        let vegetable = draft.into_vegetable(id.to_string());
        validate(&vegetable)?;

        let result = sqlx::query(
            r#"
            UPDATE vegetables SET
                name = ?2,
                price_per_100_grams = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&vegetable.id)
        .bind(&vegetable.name)
        .bind(price_column(vegetable.price_per_100_grams))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Vegetable, id));
        }
        Ok(vegetable)
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        debug!(id = %id, "Deleting vegetable");
        let result = sqlx::query("DELETE FROM vegetables WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Vegetable, id));
        }
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> CatalogResult<Option<Vegetable>> {
        sqlx::query_as::<_, VegetableRow>(
            r#"
            SELECT id, name, price_per_100_grams
            FROM vegetables
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(VegetableRow::into_vegetable)
        .transpose()
    }

    /// All vegetables, sorted by name (unnamed first).
    pub async fn list(&self) -> CatalogResult<Vec<Vegetable>> {
        sqlx::query_as::<_, VegetableRow>(
            r#"
            SELECT id, name, price_per_100_grams
            FROM vegetables
            ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(VegetableRow::into_vegetable)
        .collect()
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vegetables")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn validate(vegetable: &Vegetable) -> CatalogResult<()> {
    validate_optional_name(&vegetable.name)?;
    validate_price("pricePer100Grams", vegetable.price_per_100_grams)?;
    Ok(())
}

/// Normalizes and validates a snapshot record, keeping its id.
pub(crate) fn restore_record(vegetable: Vegetable) -> CatalogResult<Vegetable> {
    let id = id_or_new(&vegetable.id);
    let vegetable = VegetableDraft {
        name: vegetable.name,
        price_per_100_grams: vegetable.price_per_100_grams,
    }
    .into_vegetable(id);
    validate(&vegetable)?;
    Ok(vegetable)
}

pub(crate) async fn insert_row<'e, E>(executor: E, vegetable: &Vegetable) -> CatalogResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO vegetables (id, name, price_per_100_grams)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&vegetable.id)
    .bind(&vegetable.name)
    .bind(price_column(vegetable.price_per_100_grams))
    .execute(executor)
    .await
    .map_err(|e| CatalogError::from(e).with_duplicate_value(&vegetable.id, &vegetable.name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, CatalogConfig};
    use grocer_core::ValidationError;
    use rust_decimal_macros::dec;

    async fn repo() -> VegetableRepository {
        Catalog::open(CatalogConfig::in_memory()).await.unwrap().vegetables()
    }

    #[tokio::test]
    async fn test_unnamed_vegetable_allowed() {
        let repo = repo().await;
        let veg = repo
            .insert(VegetableDraft::new("", Money::from_cents(150)))
            .await
            .unwrap();
        assert_eq!(veg.name, "");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let repo = repo().await;
        repo.insert(VegetableDraft::new("Carrot", Money::from_cents(100))).await.unwrap();
        repo.insert(VegetableDraft::new("Carrot", Money::from_cents(120))).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sub_cent_price_survives_storage() {
        let repo = repo().await;
        let veg = repo
            .insert(VegetableDraft::new("Cress", Money::new(dec!(0.125))))
            .await
            .unwrap();
        let stored = repo.get_by_id(&veg.id).await.unwrap().unwrap();
        assert_eq!(stored.price_per_100_grams.amount(), dec!(0.125));
    }

    #[tokio::test]
    async fn test_price_must_be_positive() {
        let repo = repo().await;
        let err = repo
            .insert(VegetableDraft::new("Leek", Money::from_cents(-1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::MustBePositive { ref field }) if field == "pricePer100Grams"
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo().await;
        let veg = repo
            .insert(VegetableDraft::new("Leek", Money::from_cents(90)))
            .await
            .unwrap();

        let updated = repo
            .update(&veg.id, VegetableDraft::new("Leek", Money::from_cents(95)))
            .await
            .unwrap();
        assert_eq!(updated.price_per_100_grams, Money::from_cents(95));
        assert!(matches!(
            repo.update("nope", VegetableDraft::new("Leek", Money::from_cents(95))).await,
            Err(CatalogError::NotFound { entity: ItemCategory::Vegetable, .. })
        ));

        repo.delete(&veg.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
