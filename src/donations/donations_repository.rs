use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::donations_model::{Donation, DonationDB, NewDonation};
use super::donations_traits::DonationRepositoryTrait;
use crate::category::Category;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::inventory::aggregator;
use crate::schema::donations;

/// Repository for managing donation data in the database
pub struct DonationRepository {
    pool: Arc<DbPool>,
}

impl DonationRepository {
    /// Creates a new DonationRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn load_domain(rows: Vec<DonationDB>) -> Result<Vec<Donation>> {
        rows.into_iter().map(Donation::try_from).collect()
    }

    // Quantities live as decimal text, so aggregation loads the raw pairs
    // and folds them in Rust instead of summing in SQL.
    fn load_category_pairs(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<(Category, Decimal)>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = donations::table
            .select((donations::category, donations::quantity))
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(donations::category.eq(category.as_str()));
        }

        let rows = query.load::<(String, String)>(&mut conn)?;
        rows.into_iter()
            .map(|(category, quantity)| {
                Ok((
                    category.parse::<Category>()?,
                    quantity.parse::<Decimal>().map_err(Error::from)?,
                ))
            })
            .collect()
    }
}

impl DonationRepositoryTrait for DonationRepository {
    fn insert(&self, new_donation: NewDonation) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;

        let record = DonationDB {
            id: Uuid::new_v4().to_string(),
            donor_name: new_donation.donor_name,
            category: new_donation.category.as_str().to_string(),
            quantity: new_donation.quantity.to_string(),
            donation_date: new_donation
                .donation_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(donations::table)
            .values(&record)
            .get_result::<DonationDB>(&mut conn)
            .map_err(Error::from)
            .and_then(Donation::try_from)
    }

    fn get_by_id(&self, id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;

        donations::table
            .find(id)
            .first::<DonationDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Donation not found with id: {}", id)))
            .and_then(Donation::try_from)
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let deleted = diesel::delete(donations::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "Donation not found with id: {}",
                id
            )));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .order(donations::created_at.asc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_category(&self, category: Category) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .filter(donations::category.eq(category.as_str()))
            .order(donations::created_at.asc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .filter(donations::donor_name.eq(donor_name))
            .order(donations::created_at.asc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn search_by_donor(&self, term: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        // SQLite LIKE is case-insensitive for ASCII
        let rows = donations::table
            .filter(donations::donor_name.like(format!("%{}%", term)))
            .order(donations::created_at.asc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .filter(donations::donation_date.between(start, end))
            .order(donations::donation_date.asc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .filter(donations::donation_date.ge(since))
            .order(donations::donation_date.desc())
            .load::<DonationDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn distinct_donor_names(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;

        donations::table
            .select(donations::donor_name)
            .distinct()
            .order(donations::donor_name.asc())
            .load::<String>(&mut conn)
            .map_err(Error::from)
    }

    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>> {
        let pairs = self.load_category_pairs(None)?;
        Ok(aggregator::totals_by_category(pairs))
    }

    fn total_for_category(&self, category: Category) -> Result<Decimal> {
        let pairs = self.load_category_pairs(Some(category))?;
        Ok(aggregator::total_for_category(pairs, category))
    }

    fn total_for_donor(&self, donor_name: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;

        let quantities = donations::table
            .filter(donations::donor_name.eq(donor_name))
            .select(donations::quantity)
            .load::<String>(&mut conn)?;

        quantities
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, quantity| {
                Ok(acc + quantity.parse::<Decimal>().map_err(Error::from)?)
            })
    }

    fn totals_by_donor_and_category(&self) -> Result<Vec<(String, Category, Decimal)>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = donations::table
            .select((
                donations::donor_name,
                donations::category,
                donations::quantity,
            ))
            .order(donations::created_at.asc())
            .load::<(String, String, String)>(&mut conn)?;

        let triples = rows
            .into_iter()
            .map(|(donor, category, quantity)| {
                Ok((
                    donor,
                    category.parse::<Category>()?,
                    quantity.parse::<Decimal>().map_err(Error::from)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(aggregator::totals_by_donor(triples)
            .into_iter()
            .flat_map(|(donor, by_category)| {
                by_category
                    .into_iter()
                    .map(move |(category, total)| (donor.clone(), category, total))
            })
            .collect())
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        donations::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(Error::from)
    }
}
