//! Search endpoints in the shape of an audiobook server's custom metadata provider.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use storytel_core::SearchResultSet;

use crate::state::AppState;

/// Query string of a search request.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// `GET /{locale}/search`
pub async fn search_locale(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResultSet> {
    run_search(&state, &params, &locale).await
}

/// `GET /search`, using the configured default locale.
pub async fn search_default(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResultSet> {
    run_search(&state, &params, state.default_locale()).await
}

async fn run_search(state: &AppState, params: &SearchParams, locale: &str) -> Json<SearchResultSet> {
    let author = params.author.as_deref().filter(|a| !a.trim().is_empty());
    Json(state.provider().search(&params.query, author, locale).await)
}
