//! # Error Types
//!
//! Domain-specific error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing request failures                       │
//! │  └── ValidationError  - Business rule / input violations               │
//! │                                                                         │
//! │  grocer-catalog errors (separate crate)                                │
//! │  └── CatalogError     - Catalog store failures                         │
//! │                                                                         │
//! │  checkout errors (in app)                                              │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: CatalogError → CoreError → AppError → terminal                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant aborts the whole pricing request. None of them is transient,
//! so nothing here is retried.

use thiserror::Error;

use crate::types::ItemCategory;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by [`OrderPricingEngine::price_order`](crate::OrderPricingEngine::price_order).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested catalog item id does not exist.
    ///
    /// Raised by the lookup collaborator and passed through unchanged.
    #[error("{category} not found: {id}")]
    ItemNotFound { category: ItemCategory, id: String },

    /// A business rule was violated (e.g. stale bread at the till).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An item category outside {BEER, BREAD, VEGETABLE} reached the engine.
    ///
    /// ## When This Occurs
    /// Only at the edge, when a caller parses a category string such as
    /// `"WINE"`. Inside the engine the closed [`ItemCategory`] enum makes this
    /// unreachable; it indicates a programming error, not a user error.
    #[error("Unsupported item category: {0}")]
    UnsupportedCategory(String),

    /// The lookup collaborator failed for a reason other than a missing id.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// An amount grew past what a decimal can hold.
    ///
    /// ## When This Occurs
    /// - A unit price times a huge quantity (line gross)
    /// - Summing line values whose total does not fit
    #[error("Amount out of range while computing {0}")]
    AmountOutOfRange(String),
}

impl CoreError {
    /// Creates an ItemNotFound error.
    pub fn not_found(category: ItemCategory, id: impl Into<String>) -> Self {
        CoreError::ItemNotFound {
            category,
            id: id.into(),
        }
    }

    /// Creates an AmountOutOfRange error.
    pub fn out_of_range(context: impl Into<String>) -> Self {
        CoreError::AmountOutOfRange(context.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Business rule and input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Bread is past its sell-by window.
    #[error("Bread too old: {name} was baked {age_days} days ago (limit {max_age_days})")]
    BreadTooOld {
        name: String,
        age_days: i64,
        max_age_days: i64,
    },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
