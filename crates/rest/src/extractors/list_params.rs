//! List pagination extractor.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roster_persistence::core::PersonStorage;
use roster_persistence::types::PageRequest;
use serde::Deserialize;

use crate::state::AppState;

/// Axum extractor for list pagination.
///
/// Reads `page` and `items` from the query string. Values that are missing,
/// non-numeric, or below 1 fall back to page 1 and the configured default
/// size; sizes above the configured maximum are clamped. Extraction never
/// fails.
#[derive(Debug, Clone, Copy)]
pub struct ListParams(pub PageRequest);

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<String>,
    items: Option<String>,
}

impl<S> FromRequestParts<AppState<S>> for ListParams
where
    S: PersonStorage + Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let query = Query::<ListQuery>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        Ok(ListParams(PageRequest::from_query(
            query.page.as_deref(),
            query.items.as_deref(),
            state.default_page_size(),
            state.max_page_size(),
        )))
    }
}
