//! Axum extractors for person requests.
//!
//! - [`PersonBody`] - Parse a JSON object request body
//! - [`ListParams`] - Parse `page` and `items` into a page request
//! - [`SearchParams`] - Parse `q` and `fields` into a search query

mod body;
mod list_params;
mod search_params;

pub use body::{PersonBody, PersonBodyRejection};
pub use list_params::ListParams;
pub use search_params::SearchParams;
