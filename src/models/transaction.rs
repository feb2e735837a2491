use chrono::{DateTime, FixedOffset, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::datetime_utils::{deserialize_datetime, serialize_datetime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_datetime"
    )]
    pub date_of_sale: DateTime<Utc>,
    pub sold: bool,
}

/// JSON shape of a [`Transaction`]: hex id and RFC 3339 date instead of BSON types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView<'a> {
    pub id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category: &'a str,
    pub date_of_sale: &'a DateTime<Utc>,
    pub sold: bool,
}

impl Transaction {
    pub fn view(&self) -> TransactionView<'_> {
        TransactionView {
            id: self.id.to_hex(),
            title: &self.title,
            description: &self.description,
            price: self.price,
            category: &self.category,
            date_of_sale: &self.date_of_sale,
            sold: self.sold,
        }
    }

    pub fn price_text(&self) -> String {
        self.price.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sold: bool,
    pub date_of_sale: DateTime<FixedOffset>,
}

/// `count` strictly increasing ids starting at a fresh `ObjectId`, so that
/// ascending `_id` reproduces feed order within one import.
pub fn feed_order_ids(count: usize) -> Vec<ObjectId> {
    let mut widened = [0u8; 16];
    widened[4..].copy_from_slice(&ObjectId::new().bytes());
    let base = u128::from_be_bytes(widened);

    (0..count as u128)
        .map(|offset| {
            let mut bytes = [0u8; 12];
            bytes.copy_from_slice(&(base + offset).to_be_bytes()[4..]);
            ObjectId::from_bytes(bytes)
        })
        .collect()
}

impl SeedRecord {
    pub fn into_transaction(self, id: ObjectId) -> Result<Transaction, String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "record {:?} has invalid price {}",
                self.title, self.price
            ));
        }

        Ok(Transaction {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            date_of_sale: self.date_of_sale.with_timezone(&Utc),
            sold: self.sold,
        })
    }
}
