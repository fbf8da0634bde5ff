use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::errors::{Error, Result, ValidationError};

const MAX_RECIPIENT_LEN: usize = 255;

/// Domain model representing one distribution event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub id: String,
    pub category: Category,
    pub quantity: Decimal,
    pub distribution_date: NaiveDate,
    /// Who received the distribution, or why it was made
    pub recipient: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDistribution {
    pub category: Category,
    pub quantity: Decimal,
    /// Defaults to the creation day when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl NewDistribution {
    /// Validates the new distribution data
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity must be positive".to_string(),
            )));
        }
        if self.quantity.normalize().scale() > 2 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity supports at most 2 decimal places".to_string(),
            )));
        }
        if self.quantity >= dec!(10_000_000_000) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity supports at most 10 integer digits".to_string(),
            )));
        }
        if let Some(recipient) = &self.recipient {
            if recipient.chars().count() > MAX_RECIPIENT_LEN {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Recipient must be at most 255 characters".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Database model for distributions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::distributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DistributionDB {
    pub id: String,
    pub category: String,
    pub quantity: String,
    pub distribution_date: NaiveDate,
    pub recipient: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<DistributionDB> for Distribution {
    type Error = Error;

    fn try_from(db: DistributionDB) -> Result<Distribution> {
        let category: Category = db.category.parse()?;
        let quantity: Decimal = db.quantity.parse().map_err(Error::from)?;
        Ok(Distribution {
            id: db.id,
            category,
            quantity,
            distribution_date: db.distribution_date,
            recipient: db.recipient,
            created_at: db.created_at,
        })
    }
}
