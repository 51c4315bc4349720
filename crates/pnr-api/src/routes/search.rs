//! Free-text catalog search: `GET /api/search?q=`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::search;
use crate::catalog::views::SearchResults;
use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_catalog))
}

/// GET /api/search: Search subjects, materials, branches and regulations.
///
/// A missing or blank `q` returns empty lists.
#[utoipa::path(
    get,
    path = "/api/search",
    params(("q" = Option<String>, Query, description = "Case-insensitive substring")),
    responses(
        (status = 200, description = "Up to ten hits per entity type", body = SearchResults),
    ),
    tag = "search"
)]
async fn search_catalog(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let query = extract_query(query)?;
    search::search(&state, &query.q).map(Json)
}
