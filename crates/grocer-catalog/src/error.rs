//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError / io / serde_json / ValidationError        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (checkout) ← code + message for the operator                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing items during pricing are not catalog errors: a prefetched
//! [`CatalogSnapshot`](crate::CatalogSnapshot) simply lacks them, and the
//! engine reports `ItemNotFound`.

use grocer_core::{ItemCategory, ValidationError};
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record with this id.
    ///
    /// ## When This Occurs
    /// - `update` or `delete` of an id that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: ItemCategory, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a beer whose name already exists (case-insensitive)
    /// - Importing a snapshot with a repeated id
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Intake rule violated (blank name, non-positive price, stale bread).
    #[error("Invalid catalog entry: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot file could not be read, parsed or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Database could not be opened.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and creation is disabled
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row could not be turned back into an item.
    ///
    /// ## When This Occurs
    /// - Price column edited by hand to something that is not a decimal
    #[error("Invalid {entity} record {id}: {reason}")]
    InvalidRecord {
        entity: ItemCategory,
        id: String,
        reason: String,
    },

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(entity: ItemCategory, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        CatalogError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_record(
        entity: ItemCategory,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CatalogError::InvalidRecord {
            entity,
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Fills in the offending value of a duplicate reported by SQLite, which
    /// only names the column.
    pub(crate) fn with_duplicate_value(self, id: &str, name: &str) -> Self {
        match self {
            CatalogError::Duplicate { field, .. } if field == "id" => {
                CatalogError::duplicate(field, id)
            }
            CatalogError::Duplicate { field, .. } if field == "name" => {
                CatalogError::duplicate(field, name)
            }
            other => other,
        }
    }
}

/// Convert sqlx errors to CatalogError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → "UNIQUE constraint failed: beers.name"
///                               becomes Duplicate { field: "name" }
/// sqlx::Error::PoolTimedOut   → CatalogError::PoolExhausted
/// sqlx::Error::PoolClosed     → CatalogError::ConnectionFailed
/// Other                       → CatalogError::Internal
/// ```
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if let Some(columns) = msg.split("UNIQUE constraint failed: ").nth(1) {
                    // "<table>.<column>"
                    let field = columns.rsplit('.').next().unwrap_or(columns).to_string();
                    CatalogError::Duplicate {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    CatalogError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => CatalogError::PoolExhausted,

            sqlx::Error::PoolClosed => {
                CatalogError::ConnectionFailed("Pool is closed".to_string())
            }

            _ => CatalogError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        CatalogError::MigrationFailed(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Snapshot(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
