use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::reports_model::{
    DonationByType, DonorContribution, DonorReport, InventoryItem, InventoryReport,
};
use crate::category::Category;
use crate::distributions::DistributionRepositoryTrait;
use crate::donations::DonationRepositoryTrait;
use crate::errors::Result;

/// Composes the two read views over the donation and distribution streams
pub struct ReportService {
    donation_repository: Arc<dyn DonationRepositoryTrait>,
    distribution_repository: Arc<dyn DistributionRepositoryTrait>,
}

impl ReportService {
    /// Creates a new ReportService instance
    pub fn new(
        donation_repository: Arc<dyn DonationRepositoryTrait>,
        distribution_repository: Arc<dyn DistributionRepositoryTrait>,
    ) -> Self {
        Self {
            donation_repository,
            distribution_repository,
        }
    }

    /// Current stock by category, for every category present in either
    /// stream. Categories never donated or distributed are omitted.
    pub fn build_inventory_report(&self) -> Result<InventoryReport> {
        let donated = self.donation_repository.totals_by_category()?;
        let distributed = self.distribution_repository.totals_by_category()?;

        let categories: HashSet<Category> =
            donated.keys().chain(distributed.keys()).copied().collect();
        debug!("Building inventory report over {} categories", categories.len());

        let mut items = Vec::with_capacity(categories.len());
        let mut total_value = Decimal::ZERO;
        for category in categories {
            let total_donated = donated.get(&category).copied().unwrap_or(Decimal::ZERO);
            let total_distributed = distributed
                .get(&category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let current_stock = total_donated - total_distributed;

            if category == Category::Money {
                total_value += current_stock;
            }

            items.push(InventoryItem {
                category,
                total_donated,
                total_distributed,
                current_stock,
            });
        }

        Ok(InventoryReport { items, total_value })
    }

    /// Per-donor contribution totals grouped by category, donors in
    /// first-seen order, with a money-only subtotal per donor
    pub fn build_donor_report(&self) -> Result<DonorReport> {
        let rows = self.donation_repository.totals_by_donor_and_category()?;

        let mut contributions: Vec<DonorContribution> = Vec::new();
        for (donor_name, category, quantity) in rows {
            let at = match contributions
                .iter()
                .position(|c| c.donor_name == donor_name)
            {
                Some(at) => at,
                None => {
                    contributions.push(DonorContribution {
                        donor_name,
                        donations: Vec::new(),
                        total_value: Decimal::ZERO,
                    });
                    contributions.len() - 1
                }
            };
            let contribution = &mut contributions[at];

            if category == Category::Money {
                contribution.total_value += quantity;
            }
            contribution.donations.push(DonationByType { category, quantity });
        }

        let total_donors = contributions.len();
        Ok(DonorReport {
            contributions,
            total_donors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::NewDonation;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn service() -> (Arc<MemoryStore>, ReportService) {
        let store = Arc::new(MemoryStore::new());
        let service = ReportService::new(store.clone(), store.clone());
        (store, service)
    }

    fn donate(store: &MemoryStore, donor: &str, category: Category, quantity: Decimal) {
        DonationRepositoryTrait::insert(
            store,
            NewDonation {
                donor_name: donor.to_string(),
                category,
                quantity,
                donation_date: None,
            },
        )
        .unwrap();
    }

    fn distribute(store: &MemoryStore, category: Category, quantity: Decimal) {
        use crate::distributions::NewDistribution;
        DistributionRepositoryTrait::insert(
            store,
            NewDistribution {
                category,
                quantity,
                distribution_date: None,
                recipient: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn empty_state_reports_are_empty() {
        let (_, service) = service();

        let inventory = service.build_inventory_report().unwrap();
        assert!(inventory.items.is_empty());
        assert_eq!(inventory.total_value, dec!(0.00));

        let donors = service.build_donor_report().unwrap();
        assert_eq!(donors.total_donors, 0);
        assert!(donors.contributions.is_empty());
    }

    #[test]
    fn inventory_covers_union_of_streams() {
        let (store, service) = service();
        donate(&store, "Harsha", Category::Food, dec!(500.00));
        donate(&store, "Harsha", Category::Clothing, dec!(300.00));
        distribute(&store, Category::Food, dec!(200.00));
        // distributed but never donated: still reported, stock negative
        distribute(&store, Category::Blankets, dec!(4.00));

        let report = service.build_inventory_report().unwrap();
        assert_eq!(report.items.len(), 3);

        let food = report.item_for(Category::Food).unwrap();
        assert_eq!(food.total_donated, dec!(500.00));
        assert_eq!(food.total_distributed, dec!(200.00));
        assert_eq!(food.current_stock, dec!(300.00));

        let clothing = report.item_for(Category::Clothing).unwrap();
        assert_eq!(clothing.current_stock, dec!(300.00));

        let blankets = report.item_for(Category::Blankets).unwrap();
        assert_eq!(blankets.total_donated, dec!(0));
        assert_eq!(blankets.current_stock, dec!(-4.00));
    }

    #[test]
    fn total_value_tracks_money_stock_only() {
        let (store, service) = service();
        donate(&store, "Harsha", Category::Food, dec!(1000.00));
        donate(&store, "Harsha", Category::Money, dec!(50.00));

        let report = service.build_inventory_report().unwrap();
        assert_eq!(report.total_value, dec!(50.00));

        distribute(&store, Category::Money, dec!(20.00));
        let report = service.build_inventory_report().unwrap();
        assert_eq!(report.total_value, dec!(30.00));
    }

    #[test]
    fn donor_report_groups_by_donor_then_category() {
        let (store, service) = service();
        donate(&store, "Harsha", Category::Money, dec!(2516.08));
        donate(&store, "Priya", Category::Food, dec!(100.00));
        donate(&store, "Harsha", Category::Clothing, dec!(450.00));
        donate(&store, "Harsha", Category::Money, dec!(83.92));

        let report = service.build_donor_report().unwrap();
        assert_eq!(report.total_donors, 2);

        // first-seen order
        assert_eq!(report.contributions[0].donor_name, "Harsha");
        assert_eq!(report.contributions[1].donor_name, "Priya");

        let harsha = &report.contributions[0];
        assert_eq!(
            harsha.donations,
            vec![
                DonationByType {
                    category: Category::Money,
                    quantity: dec!(2600.00),
                },
                DonationByType {
                    category: Category::Clothing,
                    quantity: dec!(450.00),
                },
            ]
        );
        assert_eq!(harsha.total_value, dec!(2600.00));

        let priya = &report.contributions[1];
        assert_eq!(priya.total_value, dec!(0));
    }

    #[test]
    fn donor_report_rebuild_is_idempotent() {
        let (store, service) = service();
        donate(&store, "Zoya", Category::Books, dec!(12.00));
        donate(&store, "Amir", Category::Money, dec!(75.25));
        donate(&store, "Zoya", Category::Books, dec!(8.00));

        let first = service.build_donor_report().unwrap();
        let second = service.build_donor_report().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_changes_donor_order_but_not_totals() {
        let (store_a, service_a) = service();
        donate(&store_a, "Zoya", Category::Books, dec!(12.00));
        donate(&store_a, "Amir", Category::Books, dec!(5.00));

        let (store_b, service_b) = service();
        donate(&store_b, "Amir", Category::Books, dec!(5.00));
        donate(&store_b, "Zoya", Category::Books, dec!(12.00));

        let report_a = service_a.build_donor_report().unwrap();
        let report_b = service_b.build_donor_report().unwrap();

        assert_eq!(report_a.contributions[0].donor_name, "Zoya");
        assert_eq!(report_b.contributions[0].donor_name, "Amir");

        let totals = |report: &DonorReport| {
            let mut totals: Vec<(String, Vec<DonationByType>)> = report
                .contributions
                .iter()
                .map(|c| (c.donor_name.clone(), c.donations.clone()))
                .collect();
            totals.sort_by(|a, b| a.0.cmp(&b.0));
            totals
        };
        assert_eq!(totals(&report_a), totals(&report_b));
    }
}
