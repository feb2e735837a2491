use crate::models::{CategoryBreakdown, PriceRange, Statistics, Transaction};

/// Inclusive upper bounds of the first nine histogram buckets. A tenth bucket
/// holds everything above the last bound.
pub const PRICE_BOUNDS: [u32; 9] = [100, 200, 300, 400, 500, 600, 700, 800, 900];

pub fn statistics(transactions: &[Transaction]) -> Statistics {
    transactions
        .iter()
        .fold(Statistics::default(), |mut stats, transaction| {
            stats.total_sale_amount += transaction.price;
            if transaction.sold {
                stats.total_sold_items += 1;
            } else {
                stats.total_not_sold_items += 1;
            }
            stats
        })
}

/// Index of the smallest bound that is >= `price`.
pub fn bucket_index(price: f64) -> usize {
    PRICE_BOUNDS
        .iter()
        .position(|bound| price <= f64::from(*bound))
        .unwrap_or(PRICE_BOUNDS.len())
}

fn bucket_label(index: usize) -> String {
    match index {
        0 => format!("0-{}", PRICE_BOUNDS[0]),
        i if i < PRICE_BOUNDS.len() => format!("{}-{}", PRICE_BOUNDS[i - 1] + 1, PRICE_BOUNDS[i]),
        _ => format!("{}-above", PRICE_BOUNDS[PRICE_BOUNDS.len() - 1] + 1),
    }
}

pub fn price_histogram(transactions: &[Transaction]) -> Vec<PriceRange> {
    let mut counts = [0u64; PRICE_BOUNDS.len() + 1];
    for transaction in transactions {
        counts[bucket_index(transaction.price)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(index, count)| PriceRange {
            range: bucket_label(index),
            count: *count,
        })
        .collect()
}

pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut categories = CategoryBreakdown::new();
    for transaction in transactions {
        *categories.entry(transaction.category.clone()).or_insert(0) += 1;
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{record, transaction};

    fn priced(prices: &[f64]) -> Vec<Transaction> {
        prices
            .iter()
            .map(|price| transaction("item", *price, "2024-03-15"))
            .collect()
    }

    #[test]
    fn statistics_cover_every_record_in_scope() {
        let records = vec![
            record("a", 100.0, "x", true, "2024-03-01"),
            record("b", 250.5, "x", false, "2024-03-02"),
            record("c", 49.5, "y", true, "2024-03-03"),
        ];

        assert_eq!(
            statistics(&records),
            Statistics {
                total_sale_amount: 400.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
        assert_eq!(statistics(&[]), Statistics::default());
    }

    #[test]
    fn bucket_boundaries_are_inclusive_upper_bounds() {
        assert_eq!(bucket_index(0.0), 0);
        assert_eq!(bucket_index(100.0), 0);
        assert_eq!(bucket_index(100.01), 1);
        assert_eq!(bucket_index(900.0), 8);
        assert_eq!(bucket_index(900.5), 9);
        assert_eq!(bucket_index(10_000.0), 9);
    }

    #[test]
    fn histogram_places_example_prices() {
        let histogram = price_histogram(&priced(&[100.0, 150.0, 900.0, 901.0]));
        let counts: Vec<(&str, u64)> = histogram
            .iter()
            .map(|r| (r.range.as_str(), r.count))
            .collect();

        assert_eq!(
            counts,
            vec![
                ("0-100", 1),
                ("101-200", 1),
                ("201-300", 0),
                ("301-400", 0),
                ("401-500", 0),
                ("501-600", 0),
                ("601-700", 0),
                ("701-800", 0),
                ("801-900", 1),
                ("901-above", 1),
            ]
        );
    }

    #[test]
    fn histogram_counts_sum_to_subset_size() {
        let records = priced(&[0.0, 12.5, 199.99, 350.0, 640.0, 777.7, 899.0, 1500.0, 99.0]);
        let total: u64 = price_histogram(&records).iter().map(|r| r.count).sum();

        assert_eq!(total, records.len() as u64);
        assert_eq!(price_histogram(&[]).len(), 10);
    }

    #[test]
    fn category_breakdown_counts_present_categories_only() {
        let records = vec![
            record("a", 1.0, "electronics", true, "2024-03-01"),
            record("b", 2.0, "jewelery", false, "2024-03-02"),
            record("c", 3.0, "electronics", false, "2024-03-03"),
        ];
        let breakdown = category_breakdown(&records);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown["electronics"], 2);
        assert_eq!(breakdown["jewelery"], 1);
        assert_eq!(breakdown.values().sum::<u64>(), records.len() as u64);
        assert!(category_breakdown(&[]).is_empty());
    }
}
