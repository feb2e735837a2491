use crate::models::{MonthFilter, Transaction};
use crate::repositories::TransactionStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store for development runs without MongoDB, and for tests.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find_by_month(
        &self,
        month: &MonthFilter,
    ) -> Result<Vec<Transaction>, mongodb::error::Error> {
        let transactions = self.transactions.read().await;
        let mut matching: Vec<Transaction> = transactions
            .iter()
            .filter(|t| month.contains(&t.date_of_sale))
            .cloned()
            .collect();
        matching.sort_by_key(|t| t.id);
        Ok(matching)
    }

    async fn count(&self) -> Result<u64, mongodb::error::Error> {
        Ok(self.transactions.read().await.len() as u64)
    }

    async fn insert_all(
        &self,
        transactions: &[Transaction],
    ) -> Result<u64, mongodb::error::Error> {
        self.transactions
            .write()
            .await
            .extend_from_slice(transactions);
        Ok(transactions.len() as u64)
    }
}
