//! # Bread Repository
//!
//! ## Intake Rules
//! - Name required, at most 200 characters
//! - Unit price strictly positive
//! - Bread baked more than six days ago is refused on insert and update
//!
//! Snapshot import skips the freshness rule: a loaf admitted last week is
//! still on the shelf, and the pricing engine refuses to sell it.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use grocer_core::validation::{validate_bread_freshness, validate_item_name, validate_price};
use grocer_core::{Bread, ItemCategory, Money};

use super::{id_or_new, new_id, parse_price, price_column};
use crate::error::{CatalogError, CatalogResult};

/// Fields a caller supplies to create or replace a bread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadDraft {
    pub name: String,
    pub baking_date: NaiveDate,
    pub unit_price: Money,
}

impl BreadDraft {
    pub fn new(name: impl Into<String>, baking_date: NaiveDate, unit_price: Money) -> Self {
        BreadDraft {
            name: name.into(),
            baking_date,
            unit_price,
        }
    }

    fn into_bread(self, id: String) -> Bread {
        Bread {
            id,
            name: self.name.trim().to_string(),
            baking_date: self.baking_date,
            unit_price: self.unit_price,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BreadRow {
    id: String,
    name: String,
    baking_date: NaiveDate,
    unit_price: String,
}

impl BreadRow {
    fn into_bread(self) -> CatalogResult<Bread> {
        let unit_price = parse_price(ItemCategory::Bread, &self.id, &self.unit_price)?;
        Ok(Bread {
            id: self.id,
            name: self.name,
            baking_date: self.baking_date,
            unit_price,
        })
    }
}

/// Repository for breads.
#[derive(Debug, Clone)]
pub struct BreadRepository {
    pool: SqlitePool,
}

impl BreadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BreadRepository { pool }
    }

    /// Inserts a new bread, judging freshness against the local date.
    pub async fn insert(&self, draft: BreadDraft) -> CatalogResult<Bread> {
        self.insert_on(draft, Local::now().date_naive()).await
    }

    /// Inserts a new bread, judging freshness against `today`.
    ///
    /// ## Returns
    /// * `Err(CatalogError::Validation(BreadTooOld))` - Baked more than six days before `today`
    pub async fn insert_on(&self, draft: BreadDraft, today: NaiveDate) -> CatalogResult<Bread> {
        let bread = draft.into_bread(new_id());
        debug!(name = %bread.name, baking_date = %bread.baking_date, "Inserting bread");
        validate(&bread)?;
        check_fresh(&bread, today)?;
        insert_row(&self.pool, &bread).await?;
        Ok(bread)
    }

    pub async fn update(&self, id: &str, draft: BreadDraft) -> CatalogResult<Bread> {
        self.update_on(id, draft, Local::now().date_naive()).await
    }

    pub async fn update_on(
        &self,
        id: &str,
        draft: BreadDraft,
        today: NaiveDate,
    ) -> CatalogResult<Bread> {
        debug!(id = %id, "Updating bread");
        let bread = draft.into_bread(id.to_string());
        validate(&bread)?;
        check_fresh(&bread, today)?;

        let result = sqlx::query(
            r#"
            UPDATE breads SET
                name = ?2,
                baking_date = ?3,
                unit_price = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&bread.id)
        .bind(&bread.name)
        .bind(bread.baking_date)
        .bind(price_column(bread.unit_price))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Bread, id));
        }
        Ok(bread)
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        debug!(id = %id, "Deleting bread");
        let result = sqlx::query("DELETE FROM breads WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(ItemCategory::Bread, id));
        }
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> CatalogResult<Option<Bread>> {
        sqlx::query_as::<_, BreadRow>(
            r#"
            SELECT id, name, baking_date, unit_price
            FROM breads
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BreadRow::into_bread)
        .transpose()
    }

    /// All breads, sorted by name.
    pub async fn list(&self) -> CatalogResult<Vec<Bread>> {
        sqlx::query_as::<_, BreadRow>(
            r#"
            SELECT id, name, baking_date, unit_price
            FROM breads
            ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(BreadRow::into_bread)
        .collect()
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM breads")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn validate(bread: &Bread) -> CatalogResult<()> {
    validate_item_name(&bread.name)?;
    validate_price("unitPrice", bread.unit_price)?;
    Ok(())
}

fn check_fresh(bread: &Bread, today: NaiveDate) -> CatalogResult<()> {
    validate_bread_freshness(bread, today).map_err(|err| {
        warn!(name = %bread.name, baking_date = %bread.baking_date, "Refused stale bread at intake");
        CatalogError::from(err)
    })?;
    Ok(())
}

/// Normalizes and validates a snapshot record, keeping its id. Freshness is
/// not checked.
pub(crate) fn restore_record(bread: Bread) -> CatalogResult<Bread> {
    let id = id_or_new(&bread.id);
    let bread = BreadDraft {
        name: bread.name,
        baking_date: bread.baking_date,
        unit_price: bread.unit_price,
    }
    .into_bread(id);
    validate(&bread)?;
    Ok(bread)
}

pub(crate) async fn insert_row<'e, E>(executor: E, bread: &Bread) -> CatalogResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO breads (id, name, baking_date, unit_price)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&bread.id)
    .bind(&bread.name)
    .bind(bread.baking_date)
    .bind(price_column(bread.unit_price))
    .execute(executor)
    .await
    .map_err(|e| CatalogError::from(e).with_duplicate_value(&bread.id, &bread.name))?;
    Ok(())
}
