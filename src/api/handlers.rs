//! JSON endpoints. Every handler parses the month, calls the dashboard
//! service once and serialises its result.

use crate::api::AppState;
use crate::error::AppError;
use crate::models::{CategoryBreakdown, CombinedView, MonthFilter, PriceRange, Statistics};
use crate::services::query::parse_page;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::info;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

type QueryResult = Result<Query<MonthParams>, QueryRejection>;

impl MonthParams {
    fn month(&self) -> Result<MonthFilter, AppError> {
        let raw = self
            .month
            .as_deref()
            .filter(|month| !month.trim().is_empty())
            .ok_or(AppError::MissingMonth)?;
        Ok(raw.parse()?)
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn initialize(State(state): State<AppState>) -> Result<String, AppError> {
    let inserted = state.service.initialize().await?;
    info!("Database initialized with {} records", inserted);
    Ok(format!("Database initialized with {} records", inserted))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Response, AppError> {
    let Query(params) = query?;
    let month = params.month()?;
    let page = parse_page(params.page.as_deref())?;
    let transactions = state
        .service
        .list(&month, params.search.as_deref(), page)
        .await?;

    let views: Vec<_> = transactions.iter().map(|t| t.view()).collect();
    Ok(Json(views).into_response())
}

pub async fn statistics(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Json<Statistics>, AppError> {
    let Query(params) = query?;
    let month = params.month()?;
    Ok(Json(state.service.statistics(&month).await?))
}

pub async fn bar_chart(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Json<Vec<PriceRange>>, AppError> {
    let Query(params) = query?;
    let month = params.month()?;
    Ok(Json(state.service.bar_chart(&month).await?))
}

pub async fn pie_chart(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Json<CategoryBreakdown>, AppError> {
    let Query(params) = query?;
    let month = params.month()?;
    Ok(Json(state.service.pie_chart(&month).await?))
}

pub async fn combined(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Response, AppError> {
    let Query(params) = query?;
    let month = params.month()?;
    let report = state.service.combined(&month).await?;

    let view = CombinedView {
        transactions: report.transactions.iter().map(|t| t.view()).collect(),
        statistics: report.statistics,
        bar_chart: report.bar_chart,
        pie_chart: report.pie_chart,
    };
    Ok(Json(view).into_response())
}
