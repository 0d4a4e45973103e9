//! Search parameter extractor.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roster_persistence::core::PersonStorage;
use roster_persistence::types::SearchQuery;
use serde::Deserialize;

use crate::state::AppState;

/// Axum extractor for search parameters.
///
/// Holds `None` when `q` is missing or blank, in which case the handler must
/// not touch the store. The query's result cap comes from configuration.
#[derive(Debug, Clone)]
pub struct SearchParams(pub Option<SearchQuery>);

#[derive(Debug, Default, Deserialize)]
struct RawSearchQuery {
    q: Option<String>,
    fields: Option<String>,
}

impl<S> FromRequestParts<AppState<S>> for SearchParams
where
    S: PersonStorage + Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let raw = Query::<RawSearchQuery>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();

        let query = SearchQuery::parse(raw.q.as_deref(), raw.fields.as_deref())
            .map(|query| query.with_limit(state.search_limit()));

        Ok(SearchParams(query))
    }
}
