use crate::models::{to_bson_datetime, MonthFilter, Transaction};
use async_trait::async_trait;
use futures::TryStreamExt;
use log::{error, info};
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database, IndexModel};

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All records sold in `month`, ordered by identifier.
    async fn find_by_month(
        &self,
        month: &MonthFilter,
    ) -> Result<Vec<Transaction>, mongodb::error::Error>;

    async fn count(&self) -> Result<u64, mongodb::error::Error>;

    /// Inserts the whole batch or nothing. Returns the number of records stored.
    async fn insert_all(&self, transactions: &[Transaction])
        -> Result<u64, mongodb::error::Error>;
}

pub struct MongoTransactionStore {
    collection: Collection<Transaction>,
}

impl MongoTransactionStore {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection(collection_name),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder().keys(doc! { "dateOfSale": 1 }).build();
        self.collection.create_index(index).await?;
        info!("Ensured dateOfSale index on {}", self.collection.name());
        Ok(())
    }
}

pub fn month_query(month: &MonthFilter) -> Document {
    match month.date_range() {
        Some((start, end)) => doc! {
            "dateOfSale": {
                "$gte": to_bson_datetime(&start),
                "$lt": to_bson_datetime(&end),
            }
        },
        None => {
            let month_number = month.month().number_from_month() as i32;
            doc! { "$expr": { "$eq": [ { "$month": "$dateOfSale" }, month_number ] } }
        }
    }
}

#[async_trait]
impl TransactionStore for MongoTransactionStore {
    async fn find_by_month(
        &self,
        month: &MonthFilter,
    ) -> Result<Vec<Transaction>, mongodb::error::Error> {
        let cursor = self
            .collection
            .find(month_query(month))
            .sort(doc! { "_id": 1 })
            .await?;
        cursor.try_collect().await
    }

    async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! {}).await
    }

    async fn insert_all(
        &self,
        transactions: &[Transaction],
    ) -> Result<u64, mongodb::error::Error> {
        if transactions.is_empty() {
            return Ok(0);
        }

        match self.collection.insert_many(transactions).await {
            Ok(result) => Ok(result.inserted_ids.len() as u64),
            Err(err) => {
                // Ids are assigned client-side, so the partial batch can be removed.
                let ids: Vec<Bson> = transactions.iter().map(|t| Bson::ObjectId(t.id)).collect();
                match self
                    .collection
                    .delete_many(doc! { "_id": { "$in": ids } })
                    .await
                {
                    Ok(removed) => info!(
                        "Rolled back {} partially inserted records",
                        removed.deleted_count
                    ),
                    Err(cleanup) => error!("Rollback after failed insert failed: {}", cleanup),
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::connect_to_database;
    use crate::test_utils::transaction;
    use mongodb::bson::oid::ObjectId;
    use std::time::Duration;

    async fn scratch_store() -> (Database, MongoTransactionStore, String) {
        let uri = std::env::var("MONGO_URI").expect("MONGO_URI must be set");
        let db = connect_to_database(&uri, "transaction_dashboard_test", Duration::from_secs(5))
            .await
            .expect("Could not connect to MongoDB");
        let name = format!("transactions_{}", ObjectId::new().to_hex());
        let store = MongoTransactionStore::new(&db, &name);
        (db, store, name)
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGO_URI"]
    async fn mongo_find_by_month_orders_by_id() {
        let (db, store, name) = scratch_store().await;
        let mut later = transaction("later", 10.0, "2024-03-02");
        let mut earlier = transaction("earlier", 20.0, "2024-03-20");
        earlier.id = ObjectId::parse_str("000000000000000000000001").unwrap();
        later.id = ObjectId::parse_str("000000000000000000000002").unwrap();
        let april = transaction("april", 30.0, "2024-04-01");

        store
            .insert_all(&[later.clone(), april, earlier.clone()])
            .await
            .unwrap();
        let found = store.find_by_month(&"2024-03".parse().unwrap()).await.unwrap();
        let any_year = store.find_by_month(&"April".parse().unwrap()).await.unwrap();

        db.collection::<Transaction>(&name).drop().await.unwrap();
        assert_eq!(found, vec![earlier, later]);
        assert_eq!(any_year.len(), 1);
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGO_URI"]
    async fn mongo_failed_insert_leaves_nothing_behind() {
        let (db, store, name) = scratch_store().await;
        let first = transaction("first", 10.0, "2024-03-02");
        let second = transaction("second", 20.0, "2024-03-03");

        // The repeated id fails the third insert after two have landed.
        let result = store
            .insert_all(&[first.clone(), second, first])
            .await;
        let remaining = store.count().await.unwrap();

        db.collection::<Transaction>(&name).drop().await.unwrap();
        assert!(result.is_err());
        assert_eq!(remaining, 0);
    }

    #[test]
    fn calendar_month_query_is_half_open_range() {
        let query = month_query(&"2024-02".parse().unwrap());
        let range = query.get_document("dateOfSale").unwrap();

        assert_eq!(
            range.get_datetime("$gte").unwrap().try_to_rfc3339_string().unwrap(),
            "2024-02-01T00:00:00Z"
        );
        assert_eq!(
            range.get_datetime("$lt").unwrap().try_to_rfc3339_string().unwrap(),
            "2024-03-01T00:00:00Z"
        );
    }

    #[test]
    fn any_year_month_query_compares_month_number() {
        let query = month_query(&"March".parse().unwrap());
        let expected = doc! {
            "$expr": { "$eq": [ { "$month": "$dateOfSale" }, 3 ] }
        };
        assert_eq!(query, expected);
    }
}
