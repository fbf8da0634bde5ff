use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::donations_model::{Donation, NewDonation};
use super::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::category::Category;
use crate::errors::Result;

/// Service for managing donations. Donations are never quantity-gated;
/// recording is an unconditional insert after request validation.
pub struct DonationService {
    donation_repository: Arc<dyn DonationRepositoryTrait>,
}

impl DonationService {
    /// Creates a new DonationService instance
    pub fn new(donation_repository: Arc<dyn DonationRepositoryTrait>) -> Self {
        Self {
            donation_repository,
        }
    }
}

impl DonationServiceTrait for DonationService {
    fn record_donation(&self, new_donation: NewDonation) -> Result<Donation> {
        new_donation.validate()?;
        debug!(
            "Recording donation of {} {} from {}",
            new_donation.quantity, new_donation.category, new_donation.donor_name
        );
        self.donation_repository.insert(new_donation)
    }

    fn get_donation(&self, id: &str) -> Result<Donation> {
        self.donation_repository.get_by_id(id)
    }

    fn get_donations(&self) -> Result<Vec<Donation>> {
        self.donation_repository.list()
    }

    fn get_donations_by_category(&self, category: Category) -> Result<Vec<Donation>> {
        self.donation_repository.filter_by_category(category)
    }

    fn get_donations_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>> {
        self.donation_repository.filter_by_donor(donor_name)
    }

    fn search_donations_by_donor(&self, term: &str) -> Result<Vec<Donation>> {
        self.donation_repository.search_by_donor(term)
    }

    fn get_donations_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Donation>> {
        self.donation_repository.filter_by_date_range(start, end)
    }

    /// Donations dated within the last `days` days, newest first
    fn get_recent_donations(&self, days: i64) -> Result<Vec<Donation>> {
        let since = Utc::now().date_naive() - Duration::days(days);
        self.donation_repository.filter_recent(since)
    }

    fn get_donor_names(&self) -> Result<Vec<String>> {
        self.donation_repository.distinct_donor_names()
    }

    fn get_total_by_category(&self, category: Category) -> Result<Decimal> {
        self.donation_repository.total_for_category(category)
    }

    fn get_total_by_donor(&self, donor_name: &str) -> Result<Decimal> {
        self.donation_repository.total_for_donor(donor_name)
    }

    fn get_donation_count(&self) -> Result<i64> {
        self.donation_repository.count()
    }

    /// Removing a donation is a historical correction; distributions already
    /// accepted against its category are left untouched even if the derived
    /// stock goes negative.
    fn delete_donation(&self, id: &str) -> Result<()> {
        self.donation_repository.delete_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn service() -> (Arc<MemoryStore>, DonationService) {
        let store = Arc::new(MemoryStore::new());
        let service = DonationService::new(store.clone());
        (store, service)
    }

    fn donation(donor: &str, category: Category, quantity: Decimal) -> NewDonation {
        NewDonation {
            donor_name: donor.to_string(),
            category,
            quantity,
            donation_date: None,
        }
    }

    #[test]
    fn record_assigns_identity_and_defaults_date() {
        let (_, service) = service();

        let stored = service
            .record_donation(donation("Harsha", Category::Money, dec!(2516.08)))
            .unwrap();

        assert!(!stored.id.is_empty());
        assert_eq!(stored.donation_date, Utc::now().date_naive());
        assert_eq!(stored.quantity, dec!(2516.08));
    }

    #[test]
    fn record_rejects_invalid_quantity_before_touching_storage() {
        let (store, service) = service();

        let result = service.record_donation(donation("Harsha", Category::Food, dec!(0)));

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.donation_count(), 0);
    }

    #[test]
    fn search_by_donor_is_case_insensitive() {
        let (_, service) = service();
        service
            .record_donation(donation("Harsha Rao", Category::Food, dec!(10)))
            .unwrap();
        service
            .record_donation(donation("Priya", Category::Food, dec!(5)))
            .unwrap();

        let hits = service.search_donations_by_donor("harsha").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].donor_name, "Harsha Rao");
    }

    #[test]
    fn donor_names_are_distinct_and_sorted() {
        let (_, service) = service();
        service
            .record_donation(donation("Zoya", Category::Toys, dec!(1)))
            .unwrap();
        service
            .record_donation(donation("Amir", Category::Toys, dec!(2)))
            .unwrap();
        service
            .record_donation(donation("Zoya", Category::Books, dec!(3)))
            .unwrap();

        assert_eq!(service.get_donor_names().unwrap(), vec!["Amir", "Zoya"]);
    }

    #[test]
    fn total_by_donor_sums_across_categories() {
        let (_, service) = service();
        service
            .record_donation(donation("Amir", Category::Money, dec!(100.25)))
            .unwrap();
        service
            .record_donation(donation("Amir", Category::Food, dec!(49.75)))
            .unwrap();

        assert_eq!(service.get_total_by_donor("Amir").unwrap(), dec!(150.00));
        assert_eq!(service.get_total_by_donor("Nobody").unwrap(), dec!(0));
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (_, service) = service();
        assert!(matches!(
            service.delete_donation("missing"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let (_, service) = service();
        let mut first = donation("Amir", Category::Food, dec!(1));
        first.donation_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let mut second = donation("Amir", Category::Food, dec!(2));
        second.donation_date = NaiveDate::from_ymd_opt(2025, 3, 15);
        let mut third = donation("Amir", Category::Food, dec!(3));
        third.donation_date = NaiveDate::from_ymd_opt(2025, 4, 1);
        service.record_donation(first).unwrap();
        service.record_donation(second).unwrap();
        service.record_donation(third).unwrap();

        let hits = service
            .get_donations_by_date_range(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            )
            .unwrap();
        assert_eq!(hits.len(), 2);
    }
}
