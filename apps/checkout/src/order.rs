//! # Order Files
//!
//! An order file is a JSON list of lines, either bare or under `items`:
//!
//! ```json
//! [
//!   { "category": "BEER",      "itemId": "…", "quantity": 6 },
//!   { "category": "vegetable", "itemId": "…", "quantity": 300 }
//! ]
//! ```
//!
//! Categories are matched case-insensitively. Zero quantities are refused
//! here, before the engine sees them.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use grocer_core::validation::validate_quantity;
use grocer_core::{ItemCategory, OrderRequest};

use crate::error::{AppError, ErrorCode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderLineInput {
    category: String,
    item_id: String,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderFile {
    Lines(Vec<OrderLineInput>),
    Wrapped { items: Vec<OrderLineInput> },
}

/// Parses an order document into engine requests.
pub fn parse_order(json: &str) -> Result<Vec<OrderRequest>, AppError> {
    let file: OrderFile = serde_json::from_str(json)
        .map_err(|e| AppError::validation(format!("Invalid order file: {}", e)))?;
    let lines = match file {
        OrderFile::Lines(lines) | OrderFile::Wrapped { items: lines } => lines,
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| -> Result<OrderRequest, AppError> {
            let category: ItemCategory = line.category.parse()?;
            validate_quantity(line.quantity).map_err(|e| {
                AppError::validation(format!("Order line {}: {}", index + 1, e))
            })?;
            Ok(OrderRequest::new(category, line.item_id, line.quantity))
        })
        .collect()
}

/// Reads and parses an order file.
pub fn read_order(path: &Path) -> Result<Vec<OrderRequest>, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCode::NotFound,
            format!("Cannot read order file {}: {}", path.display(), e),
        )
    })?;
    let requests = parse_order(&raw)?;
    debug!(path = %path.display(), lines = requests.len(), "Order file read");
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let json = r#"[
            {"category": "BEER", "itemId": "duvel", "quantity": 6},
            {"category": "vegetable", "itemId": "broccoli", "quantity": 300}
        ]"#;
        let requests = parse_order(json).unwrap();
        assert_eq!(
            requests,
            vec![
                OrderRequest::new(ItemCategory::Beer, "duvel", 6),
                OrderRequest::new(ItemCategory::Vegetable, "broccoli", 300),
            ]
        );
    }

    #[test]
    fn test_parse_wrapped_list() {
        let json = r#"{"items": [{"category": "Bread", "itemId": "rye", "quantity": 2}]}"#;
        let requests = parse_order(json).unwrap();
        assert_eq!(requests, vec![OrderRequest::new(ItemCategory::Bread, "rye", 2)]);
    }

    #[test]
    fn test_empty_order_is_valid() {
        assert!(parse_order("[]").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category() {
        let json = r#"[{"category": "WINE", "itemId": "x", "quantity": 1}]"#;
        let err = parse_order(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("WINE"));
    }

    #[test]
    fn test_zero_quantity_refused() {
        let json = r#"[{"category": "BEER", "itemId": "duvel", "quantity": 0}]"#;
        let err = parse_order(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Order line 1: quantity must be positive");
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_order("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Invalid order file"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_order(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
