use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TransactionView;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub range: String,
    pub count: u64,
}

pub type CategoryBreakdown = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView<'a> {
    pub transactions: Vec<TransactionView<'a>>,
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRange>,
    pub pie_chart: CategoryBreakdown,
}
