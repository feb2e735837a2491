mod datetime_utils;
mod month;
mod summary;
mod transaction;

pub use datetime_utils::to_bson_datetime;
pub use month::{MonthFilter, ParseMonthError};
pub use summary::{CategoryBreakdown, CombinedView, PriceRange, Statistics};
pub use transaction::{feed_order_ids, SeedRecord, Transaction, TransactionView};
