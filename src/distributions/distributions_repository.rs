use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::distributions_model::{Distribution, DistributionDB, NewDistribution};
use super::distributions_traits::DistributionRepositoryTrait;
use crate::category::Category;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::inventory::aggregator;
use crate::schema::distributions;

/// Repository for managing distribution data in the database
pub struct DistributionRepository {
    pool: Arc<DbPool>,
}

impl DistributionRepository {
    /// Creates a new DistributionRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn load_domain(rows: Vec<DistributionDB>) -> Result<Vec<Distribution>> {
        rows.into_iter().map(Distribution::try_from).collect()
    }

    fn load_category_pairs(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<(Category, Decimal)>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = distributions::table
            .select((distributions::category, distributions::quantity))
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(distributions::category.eq(category.as_str()));
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

impl DistributionRepositoryTrait for DistributionRepository {
    fn insert(&self, new_distribution: NewDistribution) -> Result<Distribution> {
        let mut conn = get_connection(&self.pool)?;

        let record = DistributionDB {
            id: Uuid::new_v4().to_string(),
            category: new_distribution.category.as_str().to_string(),
            quantity: new_distribution.quantity.to_string(),
            distribution_date: new_distribution
                .distribution_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            recipient: new_distribution.recipient,
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(distributions::table)
            .values(&record)
            .get_result::<DistributionDB>(&mut conn)
            .map_err(Error::from)
            .and_then(Distribution::try_from)
    }

    fn get_by_id(&self, id: &str) -> Result<Distribution> {
        let mut conn = get_connection(&self.pool)?;

        distributions::table
            .find(id)
            .first::<DistributionDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Distribution not found with id: {}", id)))
            .and_then(Distribution::try_from)
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let deleted = diesel::delete(distributions::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "Distribution not found with id: {}",
                id
            )));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = distributions::table
            .order(distributions::created_at.asc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_category(&self, category: Category) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = distributions::table
            .filter(distributions::category.eq(category.as_str()))
            .order(distributions::created_at.asc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_recipient(&self, recipient: &str) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = distributions::table
            .filter(distributions::recipient.eq(recipient))
            .order(distributions::created_at.asc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn search_by_recipient(&self, term: &str) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        // SQLite LIKE is case-insensitive for ASCII
        let rows = distributions::table
            .filter(distributions::recipient.like(format!("%{}%", term)))
            .order(distributions::created_at.asc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = distributions::table
            .filter(distributions::distribution_date.between(start, end))
            .order(distributions::distribution_date.asc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn filter_recent(&self, since: NaiveDate) -> Result<Vec<Distribution>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = distributions::table
            .filter(distributions::distribution_date.ge(since))
            .order(distributions::distribution_date.desc())
            .load::<DistributionDB>(&mut conn)?;
        Self::load_domain(rows)
    }

    fn distinct_recipients(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;

        let recipients = distributions::table
            .filter(distributions::recipient.is_not_null())
            .select(distributions::recipient)
            .distinct()
            .order(distributions::recipient.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(recipients.into_iter().flatten().collect())
    }

    fn totals_by_category(&self) -> Result<HashMap<Category, Decimal>> {
        let pairs = self.load_category_pairs(None)?;
        Ok(aggregator::totals_by_category(pairs))
    }

    fn total_for_category(&self, category: Category) -> Result<Decimal> {
        let pairs = self.load_category_pairs(Some(category))?;
        Ok(aggregator::total_for_category(pairs, category))
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        distributions::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(Error::from)
    }
}
