use rust_decimal::Decimal;
use thiserror::Error;

use crate::category::Category;

/// Custom error type for inventory-related operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Recording the distribution would drive the category's stock negative.
    /// Always recoverable; the caller can retry with a smaller quantity.
    #[error("Insufficient stock of {category}: requested {requested}, available {available}")]
    InsufficientStock {
        category: Category,
        requested: Decimal,
        available: Decimal,
    },
}
