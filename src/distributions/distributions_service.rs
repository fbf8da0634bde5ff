use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::distributions_model::{Distribution, NewDistribution};
use super::distributions_traits::{DistributionRepositoryTrait, DistributionServiceTrait};
use crate::category::Category;
use crate::errors::Result;
use crate::inventory::{InventoryCheck, InventoryGate};

/// Service for managing distributions. The record path never inserts
/// directly; the Inventory Gate is the sole authority for approving one.
pub struct DistributionService {
    distribution_repository: Arc<dyn DistributionRepositoryTrait>,
    inventory_gate: Arc<InventoryGate>,
}

impl DistributionService {
    /// Creates a new DistributionService instance
    pub fn new(
        distribution_repository: Arc<dyn DistributionRepositoryTrait>,
        inventory_gate: Arc<InventoryGate>,
    ) -> Self {
        Self {
            distribution_repository,
            inventory_gate,
        }
    }
}

#[async_trait]
impl DistributionServiceTrait for DistributionService {
    async fn record_distribution(
        &self,
        new_distribution: NewDistribution,
    ) -> Result<Distribution> {
        new_distribution.validate()?;
        debug!(
            "Recording distribution of {} {}",
            new_distribution.quantity, new_distribution.category
        );
        self.inventory_gate
            .try_reserve_and_record(new_distribution)
            .await
    }

    fn check_availability(
        &self,
        category: Category,
        requested: Decimal,
    ) -> Result<InventoryCheck> {
        self.inventory_gate.check_availability(category, requested)
    }

    fn current_stock(&self, category: Category) -> Result<Decimal> {
        self.inventory_gate.current_stock(category)
    }

    fn get_distribution(&self, id: &str) -> Result<Distribution> {
        self.distribution_repository.get_by_id(id)
    }

    fn get_distributions(&self) -> Result<Vec<Distribution>> {
        self.distribution_repository.list()
    }

    fn get_distributions_by_category(&self, category: Category) -> Result<Vec<Distribution>> {
        self.distribution_repository.filter_by_category(category)
    }

    fn get_distributions_by_recipient(&self, recipient: &str) -> Result<Vec<Distribution>> {
        self.distribution_repository.filter_by_recipient(recipient)
    }

    fn search_distributions_by_recipient(&self, term: &str) -> Result<Vec<Distribution>> {
        self.distribution_repository.search_by_recipient(term)
    }

    fn get_distributions_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Distribution>> {
        self.distribution_repository.filter_by_date_range(start, end)
    }

    /// Distributions dated within the last `days` days, newest first
    fn get_recent_distributions(&self, days: i64) -> Result<Vec<Distribution>> {
        let since = Utc::now().date_naive() - Duration::days(days);
        self.distribution_repository.filter_recent(since)
    }

    fn get_recipients(&self) -> Result<Vec<String>> {
        self.distribution_repository.distinct_recipients()
    }

    fn get_total_by_category(&self, category: Category) -> Result<Decimal> {
        self.distribution_repository.total_for_category(category)
    }

    fn get_distribution_count(&self) -> Result<i64> {
        self.distribution_repository.count()
    }

    fn delete_distribution(&self, id: &str) -> Result<()> {
        self.distribution_repository.delete_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::{DonationRepositoryTrait, NewDonation};
    use crate::errors::Error;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn service() -> (Arc<MemoryStore>, DistributionService) {
        let store = Arc::new(MemoryStore::new());
        let gate = Arc::new(InventoryGate::new(store.clone(), store.clone()));
        let service = DistributionService::new(store.clone(), gate);
        (store, service)
    }

    fn donate(store: &MemoryStore, category: Category, quantity: Decimal) {
        DonationRepositoryTrait::insert(
            store,
            NewDonation {
                donor_name: "Harsha".to_string(),
                category,
                quantity,
                donation_date: None,
            },
        )
        .unwrap();
    }

    fn distribution(category: Category, quantity: Decimal) -> NewDistribution {
        NewDistribution {
            category,
            quantity,
            distribution_date: None,
            recipient: Some("Community kitchen".to_string()),
        }
    }

    #[tokio::test]
    async fn record_goes_through_the_gate() {
        let (store, service) = service();
        donate(&store, Category::Food, dec!(100.00));

        let stored = service
            .record_distribution(distribution(Category::Food, dec!(40.00)))
            .await
            .unwrap();
        assert!(!stored.id.is_empty());
        assert_eq!(service.current_stock(Category::Food).unwrap(), dec!(60.00));
    }

    #[tokio::test]
    async fn record_rejects_invalid_request_before_the_gate() {
        let (_, service) = service();

        let result = service
            .record_distribution(distribution(Category::Food, dec!(-1)))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn record_refuses_overdraw() {
        let (store, service) = service();
        donate(&store, Category::Food, dec!(10.00));

        let result = service
            .record_distribution(distribution(Category::Food, dec!(10.01)))
            .await;
        assert!(matches!(result, Err(Error::Inventory(_))));
        assert_eq!(service.get_distribution_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn recipient_search_is_case_insensitive() {
        let (store, service) = service();
        donate(&store, Category::Blankets, dec!(50));

        service
            .record_distribution(NewDistribution {
                category: Category::Blankets,
                quantity: dec!(5),
                distribution_date: None,
                recipient: Some("Northside Shelter".to_string()),
            })
            .await
            .unwrap();

        let hits = service
            .search_distributions_by_recipient("northside")
            .unwrap();
        assert_eq!(hits.len(), 1);

        assert_eq!(
            service.get_recipients().unwrap(),
            vec!["Northside Shelter"]
        );
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let (_, service) = service();
        assert!(matches!(
            service.delete_distribution("missing"),
            Err(Error::NotFound(_))
        ));
    }
}
