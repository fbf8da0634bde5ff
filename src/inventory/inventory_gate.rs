use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::inventory_errors::InventoryError;
use super::inventory_model::InventoryCheck;
use crate::category::Category;
use crate::distributions::{Distribution, DistributionRepositoryTrait, NewDistribution};
use crate::donations::DonationRepositoryTrait;
use crate::errors::Result;

/// The sole authority for approving new distributions.
///
/// Stock is derived, never stored: every decision recomputes it from the
/// two streams. The gate holds no state beyond one mutex per category,
/// which serializes the read-check-insert sequence so that concurrent
/// requests for the same category can never jointly over-draw it.
pub struct InventoryGate {
    donation_repository: Arc<dyn DonationRepositoryTrait>,
    distribution_repository: Arc<dyn DistributionRepositoryTrait>,
    locks: DashMap<Category, Arc<Mutex<()>>>,
}

impl InventoryGate {
    /// Creates a new InventoryGate instance
    pub fn new(
        donation_repository: Arc<dyn DonationRepositoryTrait>,
        distribution_repository: Arc<dyn DistributionRepositoryTrait>,
    ) -> Self {
        Self {
            donation_repository,
            distribution_repository,
            locks: DashMap::new(),
        }
    }

    fn category_lock(&self, category: Category) -> Arc<Mutex<()>> {
        self.locks
            .entry(category)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Current stock for a category: total donated minus total distributed.
    /// May be negative after a donation was deleted out from under already
    /// recorded distributions; callers get the raw value, never a clamp.
    pub fn current_stock(&self, category: Category) -> Result<Decimal> {
        let donated = self.donation_repository.total_for_category(category)?;
        let distributed = self.distribution_repository.total_for_category(category)?;
        Ok(donated - distributed)
    }

    /// Compares current stock against a requested quantity. Advisory only:
    /// the answer can go stale the moment it is returned, so the record
    /// path must use [`try_reserve_and_record`](Self::try_reserve_and_record)
    /// rather than check-then-insert.
    pub fn check_availability(
        &self,
        category: Category,
        requested: Decimal,
    ) -> Result<InventoryCheck> {
        let available = self.current_stock(category)?;
        Ok(InventoryCheck {
            category,
            requested_quantity: requested,
            available_quantity: available,
            sufficient: available >= requested,
        })
    }

    /// Availability check and store insert as one atomic unit with respect
    /// to other distributions of the same category. On insufficiency, fails
    /// with no side effect.
    pub async fn try_reserve_and_record(
        &self,
        new_distribution: NewDistribution,
    ) -> Result<Distribution> {
        let category = new_distribution.category;
        let lock = self.category_lock(category);
        let _guard = lock.lock().await;

        let check = self.check_availability(category, new_distribution.quantity)?;
        if !check.sufficient {
            debug!(
                "Refusing distribution of {} {}: only {} available",
                new_distribution.quantity, category, check.available_quantity
            );
            return Err(InventoryError::InsufficientStock {
                category,
                requested: new_distribution.quantity,
                available: check.available_quantity,
            }
            .into());
        }

        self.distribution_repository.insert(new_distribution)
    }
}
