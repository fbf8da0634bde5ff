use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::distributions_model::{Distribution, NewDistribution};
use crate::category::Category;
use crate::errors::Result;
use crate::inventory::InventoryCheck;

/// Contract for distribution storage operations. Implemented by the SQLite
/// repository and by the in-memory reference store.
///
/// `insert` is unconditional at this layer; gating against available stock
/// belongs to the Inventory Gate, which is the only caller allowed to
/// create distributions.
pub trait DistributionRepositoryTrait: Send + Sync {
    /// Stores the distribution, assigning its id and creation timestamp
    fn insert(&self, new_distribution: NewDistribution) -> Result<Distribution>;
    fn get_by_id(&self, id: &str) -> Result<Distribution>;
    fn delete_by_id(&self, id: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<Distribution>>;
    fn filter_by_category(&self, category: Category) -> Result<Vec<Distribution>>;
    fn filter_by_recipient(&self, recipient: &str) -> Result<Vec<Distribution>>;
    fn search_by_recipient(&self, term: &str) -> Result<Vec<Distribution>>;
    fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Distribution>>;
    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Distribution>>;
    fn distinct_recipients(&self) -> Result<Vec<String>>;
    /// Categories with no distributions are absent from the result
    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>>;
    /// Zero (not absent) when the category has no distributions
    fn total_for_category(&self, category: Category) -> Result<Decimal>;
    fn count(&self) -> Result<i64>;
}

/// Contract for distribution service operations
#[async_trait]
pub trait DistributionServiceTrait: Send + Sync {
    /// Records a distribution if current stock covers it; fails with the
    /// insufficient-stock error otherwise, with no side effect
    async fn record_distribution(&self, new_distribution: NewDistribution)
        -> Result<Distribution>;
    fn check_availability(&self, category: Category, requested: Decimal)
        -> Result<InventoryCheck>;
    fn current_stock(&self, category: Category) -> Result<Decimal>;
    fn get_distribution(&self, id: &str) -> Result<Distribution>;
    fn get_distributions(&self) -> Result<Vec<Distribution>>;
    fn get_distributions_by_category(&self, category: Category) -> Result<Vec<Distribution>>;
    fn get_distributions_by_recipient(&self, recipient: &str) -> Result<Vec<Distribution>>;
    fn search_distributions_by_recipient(&self, term: &str) -> Result<Vec<Distribution>>;
    fn get_distributions_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Distribution>>;
    fn get_recent_distributions(&self, days: i64) -> Result<Vec<Distribution>>;
    fn get_recipients(&self) -> Result<Vec<String>>;
    fn get_total_by_category(&self, category: Category) -> Result<Decimal>;
    fn get_distribution_count(&self) -> Result<i64>;
    fn delete_distribution(&self, id: &str) -> Result<()>;
}
