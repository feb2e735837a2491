pub mod aggregation;
pub mod dashboard;
pub mod database;
pub mod query;
pub mod seed_feed;
