//! # Validation Module
//!
//! Business rule validation shared by the catalog, the engine and the
//! checkout app.
//!
//! ## Where Each Rule Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog intake (grocer-catalog)                              │
//! │  ├── validate_item_name / validate_price                               │
//! │  └── validate_bread_freshness  (stale bread never enters)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout request (apps/checkout)                             │
//! │  └── validate_quantity         (zero-quantity lines rejected)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine (this crate)                                  │
//! │  └── validate_bread_freshness  (bread may have aged since intake)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::validation::{validate_item_name, validate_quantity};
//!
//! validate_item_name("Duvel").unwrap();
//! validate_quantity(6).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Bread;
use crate::{MAX_BREAD_AGE_DAYS, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required item name (beer, bread).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_optional_name(name)
}

/// Validates a name that may be empty (vegetables).
pub fn validate_optional_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity (units or grams).
///
/// The engine itself prices zero-quantity lines as zero; rejecting them is
/// the caller's decision.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be strictly positive; the catalog has no free items
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Freshness
// =============================================================================

/// Checks that a bread is still sellable on `today`.
///
/// Returns the bread's age in days.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use grocer_core::money::Money;
/// use grocer_core::types::Bread;
/// use grocer_core::validation::validate_bread_freshness;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let bread = Bread {
///     id: "b1".into(),
///     name: "Sourdough".into(),
///     baking_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     unit_price: Money::from_cents(350),
/// };
/// assert_eq!(validate_bread_freshness(&bread, today).unwrap(), 6);
/// ```
pub fn validate_bread_freshness(bread: &Bread, today: NaiveDate) -> ValidationResult<i64> {
    let age_days = bread.age_in_days(today);

    if age_days > MAX_BREAD_AGE_DAYS {
        return Err(ValidationError::BreadTooOld {
            name: bread.name.clone(),
            age_days,
            max_age_days: MAX_BREAD_AGE_DAYS,
        });
    }

    Ok(age_days)
}

// =============================================================================
// Unit Tests
// =============================================================================
