//! Pure aggregation over the donation and distribution streams.
//!
//! All summation is decimal-exact; callers hand in raw (category, quantity)
//! pairs or (donor, category, quantity) triples and get grouped totals back.
//! Categories with no rows are absent from map results; the single-category
//! total is zero instead.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::category::Category;

/// Sums quantities grouped by category
pub fn totals_by_category<I>(rows: I) -> HashMap<Category, Decimal>
where
    I: IntoIterator<Item = (Category, Decimal)>,
{
    let mut totals: HashMap<Category, Decimal> = HashMap::new();
    for (category, quantity) in rows {
        *totals.entry(category).or_insert(Decimal::ZERO) += quantity;
    }
    totals
}

/// Sums quantities for one category; zero when no rows match
pub fn total_for_category<I>(rows: I, category: Category) -> Decimal
where
    I: IntoIterator<Item = (Category, Decimal)>,
{
    rows.into_iter()
        .filter(|(c, _)| *c == category)
        .fold(Decimal::ZERO, |acc, (_, quantity)| acc + quantity)
}

/// Groups donation rows by donor, then by category, preserving first-seen
/// donor order and first-seen category order within a donor. A given
/// (donor, category) pair appears at most once with its quantity summed.
pub fn totals_by_donor<I>(rows: I) -> Vec<(String, Vec<(Category, Decimal)>)>
where
    I: IntoIterator<Item = (String, Category, Decimal)>,
{
    let mut donors: Vec<(String, Vec<(Category, Decimal)>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (donor, category, quantity) in rows {
        let at = match index.get(&donor) {
            Some(at) => *at,
            None => {
                index.insert(donor.clone(), donors.len());
                donors.push((donor, Vec::new()));
                donors.len() - 1
            }
        };
        let by_category = &mut donors[at].1;
        match by_category.iter_mut().find(|(c, _)| *c == category) {
            Some((_, total)) => *total += quantity,
            None => by_category.push((category, quantity)),
        }
    }

    donors
}
