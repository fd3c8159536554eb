//! # Checkout Error Type
//!
//! Everything that can go wrong in the CLI, flattened into a code and a
//! message for the operator.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigError ──────────────────────────┐                               │
//! │  CatalogError (database / snapshot) ───┼──► AppError { code, message } │
//! │  CoreError (pricing) ──────────────────┘          │                    │
//! │                                                   ▼                    │
//! │                                  stderr: "error[NOT_FOUND]: ..."       │
//! │                                  exit code: 2 for caller mistakes,     │
//! │                                             1 for everything else      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal faults are logged in full with `tracing::error!` and shown to the
//! operator as a generic message.

use serde::Serialize;

use grocer_catalog::CatalogError;
use grocer_core::CoreError;

use crate::config::ConfigError;

/// Error reported by the checkout CLI.
///
/// ## Serialization
/// With `--json`, failures are printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "BEER not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown catalog item or missing file
    NotFound,

    /// Bad order: stale bread, zero quantity, unknown category, bad JSON,
    /// amounts too large to price
    ValidationError,

    /// Catalog could not be loaded or consulted
    CatalogError,

    /// Invalid environment configuration
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Stable wire name, e.g. `"NOT_FOUND"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit code: 2 when the order itself is at fault.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::NotFound | ErrorCode::ValidationError => 2,
            _ => 1,
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts pricing errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            err @ CoreError::ItemNotFound { .. } => AppError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
            err @ CoreError::UnsupportedCategory(_) => AppError::validation(err.to_string()),
            err @ CoreError::AmountOutOfRange(_) => AppError::validation(err.to_string()),
            CoreError::CatalogUnavailable(e) => {
                tracing::error!("Catalog lookup failed: {}", e);
                AppError::new(ErrorCode::CatalogError, "Catalog is unavailable")
            }
        }
    }
}

/// Converts catalog errors.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            err @ CatalogError::NotFound { .. } => AppError::new(ErrorCode::NotFound, err.to_string()),
            err @ CatalogError::Duplicate { .. } => AppError::new(ErrorCode::CatalogError, err.to_string()),
            err @ CatalogError::Validation(_) => AppError::new(ErrorCode::CatalogError, err.to_string()),
            CatalogError::Snapshot(e) => {
                tracing::error!("Catalog snapshot failed: {}", e);
                AppError::new(ErrorCode::CatalogError, format!("Could not load catalog: {}", e))
            }
            CatalogError::ConnectionFailed(e) => {
                tracing::error!("Catalog database could not be opened: {}", e);
                AppError::new(ErrorCode::CatalogError, format!("Could not open catalog: {}", e))
            }
            err @ (CatalogError::MigrationFailed(_)
            | CatalogError::QueryFailed(_)
            | CatalogError::InvalidRecord { .. }
            | CatalogError::PoolExhausted
            | CatalogError::Internal(_)) => {
                tracing::error!("Catalog operation failed: {}", err);
                AppError::new(ErrorCode::CatalogError, "Catalog operation failed")
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}
