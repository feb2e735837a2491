pub mod memory_repository;
pub mod transaction_repository;

pub use memory_repository::InMemoryTransactionStore;
pub use transaction_repository::{MongoTransactionStore, TransactionStore};
