use crate::error::AppError;
use crate::models::{CategoryBreakdown, MonthFilter, PriceRange, Statistics, Transaction};
use crate::repositories::TransactionStore;
use crate::services::aggregation;
use crate::services::query::{apply_search, paginate};
use crate::services::seed_feed::SeedSource;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

#[derive(Debug, Clone)]
pub struct MonthReport {
    pub transactions: Vec<Transaction>,
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRange>,
    pub pie_chart: CategoryBreakdown,
}

pub struct DashboardService {
    store: Arc<dyn TransactionStore>,
    seed: Arc<dyn SeedSource>,
    query_timeout: Duration,
    init_lock: Mutex<()>,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn TransactionStore>,
        seed: Arc<dyn SeedSource>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            store,
            seed,
            query_timeout,
            init_lock: Mutex::new(()),
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, mongodb::error::Error>>,
    ) -> Result<T, AppError> {
        timeout(self.query_timeout, call)
            .await
            .map_err(|_| AppError::Timeout(operation))?
            .map_err(AppError::from)
    }

    async fn month_snapshot(&self, month: &MonthFilter) -> Result<Vec<Transaction>, AppError> {
        debug!("Loading transactions for {}", month);
        self.bounded("storage query", self.store.find_by_month(month))
            .await
    }

    pub async fn list(
        &self,
        month: &MonthFilter,
        search: Option<&str>,
        page: u64,
    ) -> Result<Vec<Transaction>, AppError> {
        let matching = apply_search(self.month_snapshot(month).await?, search);
        Ok(paginate(&matching, page).to_vec())
    }

    pub async fn statistics(&self, month: &MonthFilter) -> Result<Statistics, AppError> {
        Ok(aggregation::statistics(&self.month_snapshot(month).await?))
    }

    pub async fn bar_chart(&self, month: &MonthFilter) -> Result<Vec<PriceRange>, AppError> {
        Ok(aggregation::price_histogram(&self.month_snapshot(month).await?))
    }

    pub async fn pie_chart(&self, month: &MonthFilter) -> Result<CategoryBreakdown, AppError> {
        Ok(aggregation::category_breakdown(&self.month_snapshot(month).await?))
    }

    pub async fn combined(&self, month: &MonthFilter) -> Result<MonthReport, AppError> {
        let snapshot = self.month_snapshot(month).await?;
        Ok(MonthReport {
            transactions: paginate(&snapshot, 1).to_vec(),
            statistics: aggregation::statistics(&snapshot),
            bar_chart: aggregation::price_histogram(&snapshot),
            pie_chart: aggregation::category_breakdown(&snapshot),
        })
    }

    /// Loads the seed feed into an empty store. Refuses to run twice so the
    /// records are never duplicated.
    pub async fn initialize(&self) -> Result<u64, AppError> {
        let _guard = self.init_lock.lock().await;

        let existing = self.bounded("storage count", self.store.count()).await?;
        if existing > 0 {
            warn!(
                "Rejecting initialization: store already holds {} records",
                existing
            );
            return Err(AppError::AlreadyInitialized(existing));
        }

        let transactions = self.seed.fetch().await?;
        info!(
            "Fetched {} seed records from {}",
            transactions.len(),
            self.seed.describe()
        );

        // Not time-bounded: abandoning a running insert could leave a partial batch.
        let inserted = self.store.insert_all(&transactions).await?;
        info!("Inserted {} records", inserted);
        Ok(inserted)
    }
}
