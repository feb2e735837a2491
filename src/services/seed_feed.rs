use crate::error::AppError;
use crate::models::{feed_order_ids, SeedRecord, Transaction};
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Returns the complete, validated batch, or an error with nothing kept.
    async fn fetch(&self) -> Result<Vec<Transaction>, AppError>;

    fn describe(&self) -> String;
}

/// Parses a feed payload. Any malformed entry rejects the whole payload.
pub fn parse_seed_payload(payload: &[u8]) -> Result<Vec<Transaction>, AppError> {
    let records: Vec<SeedRecord> = serde_json::from_slice(payload)
        .map_err(|e| AppError::SeedFeed(format!("malformed payload: {}", e)))?;

    let ids = feed_order_ids(records.len());
    records
        .into_iter()
        .zip(ids)
        .map(|(record, id)| record.into_transaction(id).map_err(AppError::SeedFeed))
        .collect()
}

pub struct HttpSeedFeed {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpSeedFeed {
    pub fn new(
        url: &str,
        timeout: Duration,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            max_retries,
            retry_delay,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<u8>, FetchFailure> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchFailure::Retryable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(FetchFailure::Retryable(format!("feed responded {}", status)));
        }
        if !status.is_success() {
            return Err(FetchFailure::Fatal(format!("feed responded {}", status)));
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| FetchFailure::Retryable(e.to_string()))
    }
}

enum FetchFailure {
    Retryable(String),
    Fatal(String),
}

#[async_trait]
impl SeedSource for HttpSeedFeed {
    async fn fetch(&self) -> Result<Vec<Transaction>, AppError> {
        let attempts = self.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            info!("Fetching seed data from {} (attempt {})", self.url, attempt);

            match self.fetch_once().await {
                Ok(payload) => return parse_seed_payload(&payload),
                Err(FetchFailure::Fatal(message)) => return Err(AppError::SeedFeed(message)),
                Err(FetchFailure::Retryable(message)) => {
                    warn!("Seed fetch attempt {} failed: {}", attempt, message);
                    last_error = message;
                    if attempt < attempts {
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(AppError::SeedFeed(format!(
            "gave up after {} attempts: {}",
            attempts, last_error
        )))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSeedFeed {
    path: PathBuf,
}

impl FileSeedFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeedFeed {
    async fn fetch(&self) -> Result<Vec<Transaction>, AppError> {
        let payload = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::SeedFeed(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        parse_seed_payload(&payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
