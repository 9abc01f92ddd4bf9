//! Title search endpoint.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::ApiResponse;
use quill_shared::dto::{SearchHit, SearchResponse};

use super::summarize;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q= - trigram similarity search over post titles.
/// A missing or blank `q` yields an empty hit list without touching the
/// store; that is "no query", not "no results".
pub async fn search_posts(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let query = params.into_inner().q;

    let hits = state.search.search(&query).await?;
    let hits: Vec<SearchHit> = hits
        .into_iter()
        .map(|scored| SearchHit {
            post: summarize(&scored.post),
            score: scored.score,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(SearchResponse {
        query: query.trim().to_string(),
        hits,
    })))
}
