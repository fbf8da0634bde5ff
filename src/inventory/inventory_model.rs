use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Outcome of checking a requested quantity against current stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCheck {
    pub category: Category,
    pub requested_quantity: Decimal,
    pub available_quantity: Decimal,
    pub sufficient: bool,
}
