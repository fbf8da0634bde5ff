use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::category::Category;
use crate::distributions::{Distribution, DistributionRepositoryTrait, NewDistribution};
use crate::donations::{Donation, DonationRepositoryTrait, NewDonation};
use crate::errors::{Error, Result};
use crate::inventory::aggregator;

/// In-memory Record Store: the reference implementation of both repository
/// contracts, behaviorally equivalent to the SQLite-backed repositories.
/// Rows are kept in insertion order, matching the `created_at` ordering the
/// database repositories query with.
#[derive(Debug, Default)]
pub struct MemoryStore {
    donations: Mutex<Vec<Donation>>,
    distributions: Mutex<Vec<Distribution>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn donations(&self) -> MutexGuard<'_, Vec<Donation>> {
        self.donations.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn distributions(&self) -> MutexGuard<'_, Vec<Distribution>> {
        self.distributions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn donation_count(&self) -> usize {
        self.donations().len()
    }

    pub fn distribution_count(&self) -> usize {
        self.distributions().len()
    }
}

impl DonationRepositoryTrait for MemoryStore {
    fn insert(&self, new_donation: NewDonation) -> Result<Donation> {
        let donation = Donation {
            id: Uuid::new_v4().to_string(),
            donor_name: new_donation.donor_name,
            category: new_donation.category,
            quantity: new_donation.quantity,
            donation_date: new_donation
                .donation_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            created_at: Utc::now().naive_utc(),
        };
        self.donations().push(donation.clone());
        Ok(donation)
    }

    fn get_by_id(&self, id: &str) -> Result<Donation> {
        self.donations()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Donation not found with id: {}", id)))
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut donations = self.donations();
        let before = donations.len();
        donations.retain(|d| d.id != id);
        if donations.len() == before {
            return Err(Error::NotFound(format!(
                "Donation not found with id: {}",
                id
            )));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Donation>> {
        Ok(self.donations().clone())
    }

    fn filter_by_category(&self, category: Category) -> Result<Vec<Donation>> {
        Ok(self
            .donations()
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect())
    }

    fn filter_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>> {
        Ok(self
            .donations()
            .iter()
            .filter(|d| d.donor_name == donor_name)
            .cloned()
            .collect())
    }

    fn search_by_donor(&self, term: &str) -> Result<Vec<Donation>> {
        let needle = term.to_lowercase();
        Ok(self
            .donations()
            .iter()
            .filter(|d| d.donor_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Donation>> {
        let mut hits: Vec<Donation> = self
            .donations()
            .iter()
            .filter(|d| d.donation_date >= start && d.donation_date <= end)
            .cloned()
            .collect();
        hits.sort_by_key(|d| d.donation_date);
        Ok(hits)
    }

    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Donation>> {
        let mut hits: Vec<Donation> = self
            .donations()
            .iter()
            .filter(|d| d.donation_date >= since)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.donation_date.cmp(&a.donation_date));
        Ok(hits)
    }

    fn distinct_donor_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.donations().iter().map(|d| d.donor_name.clone()).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>> {
        Ok(aggregator::totals_by_category(
            self.donations().iter().map(|d| (d.category, d.quantity)),
        ))
    }

    fn total_for_category(&self, category: Category) -> Result<Decimal> {
        Ok(aggregator::total_for_category(
            self.donations().iter().map(|d| (d.category, d.quantity)),
            category,
        ))
    }

    fn total_for_donor(&self, donor_name: &str) -> Result<Decimal> {
        Ok(self
            .donations()
            .iter()
            .filter(|d| d.donor_name == donor_name)
            .fold(Decimal::ZERO, |acc, d| acc + d.quantity))
    }

    fn totals_by_donor_and_category(&self) -> Result<Vec<(String, Category, Decimal)>> {
        let grouped = aggregator::totals_by_donor(
            self.donations()
                .iter()
                .map(|d| (d.donor_name.clone(), d.category, d.quantity)),
        );
        Ok(grouped
            .into_iter()
            .flat_map(|(donor, by_category)| {
                by_category
                    .into_iter()
                    .map(move |(category, total)| (donor.clone(), category, total))
            })
            .collect())
    }

    fn count(&self) -> Result<i64> {
        Ok(self.donations().len() as i64)
    }
}

impl DistributionRepositoryTrait for MemoryStore {
    fn insert(&self, new_distribution: NewDistribution) -> Result<Distribution> {
        let distribution = Distribution {
            id: Uuid::new_v4().to_string(),
            category: new_distribution.category,
            quantity: new_distribution.quantity,
            distribution_date: new_distribution
                .distribution_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            recipient: new_distribution.recipient,
            created_at: Utc::now().naive_utc(),
        };
        self.distributions().push(distribution.clone());
        Ok(distribution)
    }

    fn get_by_id(&self, id: &str) -> Result<Distribution> {
        self.distributions()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Distribution not found with id: {}", id)))
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut distributions = self.distributions();
        let before = distributions.len();
        distributions.retain(|d| d.id != id);
        if distributions.len() == before {
            return Err(Error::NotFound(format!(
                "Distribution not found with id: {}",
                id
            )));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Distribution>> {
        Ok(self.distributions().clone())
    }

    fn filter_by_category(&self, category: Category) -> Result<Vec<Distribution>> {
        Ok(self
            .distributions()
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect())
    }

    fn filter_by_recipient(&self, recipient: &str) -> Result<Vec<Distribution>> {
        Ok(self
            .distributions()
            .iter()
            .filter(|d| d.recipient.as_deref() == Some(recipient))
            .cloned()
            .collect())
    }

    fn search_by_recipient(&self, term: &str) -> Result<Vec<Distribution>> {
        let needle = term.to_lowercase();
        Ok(self
            .distributions()
            .iter()
            .filter(|d| {
                d.recipient
                    .as_deref()
                    .is_some_and(|r| r.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Distribution>> {
        let mut hits: Vec<Distribution> = self
            .distributions()
            .iter()
            .filter(|d| d.distribution_date >= start && d.distribution_date <= end)
            .cloned()
            .collect();
        hits.sort_by_key(|d| d.distribution_date);
        Ok(hits)
    }

    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Distribution>> {
        let mut hits: Vec<Distribution> = self
            .distributions()
            .iter()
            .filter(|d| d.distribution_date >= since)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.distribution_date.cmp(&a.distribution_date));
        Ok(hits)
    }

    fn distinct_recipients(&self) -> Result<Vec<String>> {
        let mut recipients: Vec<String> = self
            .distributions()
            .iter()
            .filter_map(|d| d.recipient.clone())
            .collect();
        recipients.sort();
        recipients.dedup();
        Ok(recipients)
    }

    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>> {
        Ok(aggregator::totals_by_category(
            self.distributions()
                .iter()
                .map(|d| (d.category, d.quantity)),
        ))
    }

    fn total_for_category(&self, category: Category) -> Result<Decimal> {
        Ok(aggregator::total_for_category(
            self.distributions()
                .iter()
                .map(|d| (d.category, d.quantity)),
            category,
        ))
    }

    fn count(&self) -> Result<i64> {
        Ok(self.distributions().len() as i64)
    }
}
