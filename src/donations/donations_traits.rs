use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::donations_model::{Donation, NewDonation};
use crate::category::Category;
use crate::errors::Result;

/// Contract for donation storage operations. Implemented by the SQLite
/// repository and by the in-memory reference store.
pub trait DonationRepositoryTrait: Send + Sync {
    /// Stores the donation, assigning its id and creation timestamp
    fn insert(&self, new_donation: NewDonation) -> Result<Donation>;
    fn get_by_id(&self, id: &str) -> Result<Donation>;
    fn delete_by_id(&self, id: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<Donation>>;
    fn filter_by_category(&self, category: Category) -> Result<Vec<Donation>>;
    fn filter_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>>;
    fn search_by_donor(&self, term: &str) -> Result<Vec<Donation>>;
    fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Donation>>;
    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Donation>>;
    fn distinct_donor_names(&self) -> Result<Vec<String>>;
    /// Categories with no donations are absent from the result
    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>>;
    /// Zero (not absent) when the category has no donations
    fn total_for_category(&self, category: Category) -> Result<Decimal>;
    fn total_for_donor(&self, donor_name: &str) -> Result<Decimal>;
    /// Summed (donor, category, quantity) triples, donors in first-seen
    /// insertion order, each (donor, category) pair at most once
    fn totals_by_donor_and_category(&self) -> Result<Vec<(String, Category, Decimal)>>;
    fn count(&self) -> Result<i64>;
}

/// Contract for donation service operations
pub trait DonationServiceTrait: Send + Sync {
    fn record_donation(&self, new_donation: NewDonation) -> Result<Donation>;
    fn get_donation(&self, id: &str) -> Result<Donation>;
    fn get_donations(&self) -> Result<Vec<Donation>>;
    fn get_donations_by_category(&self, category: Category) -> Result<Vec<Donation>>;
    fn get_donations_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>>;
    fn search_donations_by_donor(&self, term: &str) -> Result<Vec<Donation>>;
    fn get_donations_by_date_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Donation>>;
    fn get_recent_donations(&self, days: i64) -> Result<Vec<Donation>>;
    fn get_donor_names(&self) -> Result<Vec<String>>;
    fn get_total_by_category(&self, category: Category) -> Result<Decimal>;
    fn get_total_by_donor(&self, donor_name: &str) -> Result<Decimal>;
    fn get_donation_count(&self) -> Result<i64>;
    fn delete_donation(&self, id: &str) -> Result<()>;
}
