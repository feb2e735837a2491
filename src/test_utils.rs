use crate::error::AppError;
use crate::models::Transaction;
use crate::services::seed_feed::SeedSource;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;

/// Unsold record in the "misc" category, sold at noon UTC on `date` (`YYYY-MM-DD`).
pub fn transaction(title: &str, price: f64, date: &str) -> Transaction {
    record(title, price, "misc", false, date)
}

pub fn record(title: &str, price: f64, category: &str, sold: bool, date: &str) -> Transaction {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date must be YYYY-MM-DD");
    Transaction {
        id: ObjectId::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        category: category.to_string(),
        date_of_sale: Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).expect("valid time")),
        sold,
    }
}

/// Seed source returning a fixed batch, or a fixed error.
pub struct StaticSeed {
    outcome: Result<Vec<Transaction>, String>,
}

impl StaticSeed {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { outcome: Ok(transactions) }
    }

    pub fn failing(message: &str) -> Self {
        Self { outcome: Err(message.to_string()) }
    }
}

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<Transaction>, AppError> {
        self.outcome.clone().map_err(AppError::SeedFeed)
    }

    fn describe(&self) -> String {
        "static seed".to_string()
    }
}
