//! API Handlers
//!
//! HTTP request handlers for each paging server endpoint.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::info;

use crate::cache::{PagingCache, SearchId};
use crate::config::Config;
use crate::error::{PagingError, Result};
use crate::models::{Bundle, GetPagesQuery, HealthResponse, SearchRequest, StatsResponse};

/// Application state shared across all handlers.
///
/// The paging cache synchronizes internally, so it is shared through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared paging cache
    pub cache: Arc<PagingCache>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState with the given cache and configuration.
    pub fn new(cache: PagingCache, config: Config) -> Self {
        Self {
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the paging cache with the configured capacity.
    pub fn from_config(config: &Config) -> Self {
        let cache = PagingCache::new(config.paging_capacity);
        Self::new(cache, config.clone())
    }

    /// Resolves a requested `_count` against the configured page sizes.
    ///
    /// Negative values pass through so the cache can reject them.
    fn page_size(&self, requested: Option<i64>) -> i64 {
        let max = i64::try_from(self.config.max_page_size).unwrap_or(i64::MAX);
        match requested {
            None => i64::try_from(self.config.default_page_size).unwrap_or(max),
            Some(count) => count.min(max),
        }
    }
}

/// Handler for POST /search
///
/// Stores a search result set and returns its first page.
pub async fn search_handler(
    State(state): State<AppState>,
    req: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Bundle>> {
    let Json(req) = req?;

    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(PagingError::InvalidArgument(error_msg));
    }

    // First page is cut under the same lock as the insert
    let count = state.page_size(req.count);
    let (id, page) = state.cache.store_and_page(req.into_resources(), count)?;
    info!(search_id = %id, total = page.total, "Search result set stored for paging");

    Ok(Json(Bundle::searchset(&page, &state.config.base_url)))
}

/// Handler for GET /?_getpages={id}
///
/// Returns one page of a previously stored search.
pub async fn get_pages_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetPagesQuery>, QueryRejection>,
) -> Result<Json<Bundle>> {
    let Query(query) = query?;
    let search_id = query
        .search_id
        .filter(|id| !id.is_empty())
        .map(SearchId::from)
        .ok_or_else(|| {
            PagingError::InvalidArgument("_getpages parameter is required".to_string())
        })?;

    let offset = query.offset.unwrap_or(0);
    let count = state.page_size(query.count);
    let page = state.cache.retrieve_page(&search_id, offset, count)?;

    Ok(Json(Bundle::searchset(&page, &state.config.base_url)))
}

/// Handler for GET /stats
///
/// Returns current paging cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.config.description.clone()))
}
