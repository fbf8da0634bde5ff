use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One line of the inventory report: a category's lifetime flows and the
/// stock derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub category: Category,
    pub total_donated: Decimal,
    pub total_distributed: Decimal,
    pub current_stock: Decimal,
}

/// Current inventory status grouped by category.
///
/// Items cover the union of categories seen in either stream; item order is
/// implementation-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub items: Vec<InventoryItem>,
    /// Current stock of the money category; zero when money never appears
    pub total_value: Decimal,
}

impl InventoryReport {
    pub fn item_for(&self, category: Category) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.category == category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationByType {
    pub category: Category,
    pub quantity: Decimal,
}

/// Total contributions received from one donor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorContribution {
    pub donor_name: String,
    pub donations: Vec<DonationByType>,
    /// Sum of this donor's money-category donations only
    pub total_value: Decimal,
}

/// Per-donor contribution breakdown, donors in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorReport {
    pub contributions: Vec<DonorContribution>,
    pub total_donors: usize,
}
