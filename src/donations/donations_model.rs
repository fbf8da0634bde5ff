use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing one donation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_name: String,
    pub category: Category,
    pub quantity: Decimal,
    pub donation_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new donation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    pub donor_name: String,
    pub category: Category,
    /// Money amount for the money category, unit count otherwise
    pub quantity: Decimal,
    /// Defaults to the creation day when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_date: Option<NaiveDate>,
}

impl NewDonation {
    /// Validates the new donation data
    pub fn validate(&self) -> Result<()> {
        if self.donor_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Donor name cannot be empty".to_string(),
            )));
        }
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
        Ok(())
    }
}

/// Database model for donations
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationDB {
    pub id: String,
    pub donor_name: String,
    pub category: String,
    pub quantity: String,
    pub donation_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

// Quantities are persisted as exact decimal text, so the row conversion can
// fail and is a TryFrom rather than a From.
impl TryFrom<DonationDB> for Donation {
    type Error = Error;

    fn try_from(db: DonationDB) -> Result<Donation> {
        let category: Category = db.category.parse()?;
        let quantity: Decimal = db.quantity.parse().map_err(Error::from)?;
        Ok(Donation {
            id: db.id,
            donor_name: db.donor_name,
            category,
            quantity,
            donation_date: db.donation_date,
            created_at: db.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_donation(quantity: Decimal) -> NewDonation {
        NewDonation {
            donor_name: "Harsha".to_string(),
            category: Category::Food,
            quantity,
            donation_date: None,
        }
    }

    #[test]
    fn accepts_two_decimal_places() {
        assert!(new_donation(dec!(100.50)).validate().is_ok());
        assert!(new_donation(dec!(0.01)).validate().is_ok());
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        assert!(new_donation(dec!(0)).validate().is_err());
        assert!(new_donation(dec!(-5.00)).validate().is_err());
    }

    #[test]
    fn rejects_excess_scale() {
        assert!(new_donation(dec!(1.001)).validate().is_err());
        // trailing zeros beyond two places are not an excess of precision
        assert!(new_donation(dec!(1.100)).validate().is_ok());
    }

    #[test]
    fn rejects_more_than_ten_integer_digits() {
        assert!(new_donation(dec!(9_999_999_999.99)).validate().is_ok());
        assert!(new_donation(dec!(10_000_000_000)).validate().is_err());
    }

    #[test]
    fn rejects_blank_donor_name() {
        let mut donation = new_donation(dec!(10));
        donation.donor_name = "   ".to_string();
        assert!(donation.validate().is_err());
    }
}
