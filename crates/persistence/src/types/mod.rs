//! Core types for the persistence layer.
//!
//! - [`DocumentId`] - 12-byte document identifier
//! - [`Person`], [`Company`], [`PersonWithCompany`] - stored documents
//! - [`PageRequest`], [`PageInfo`] - list pagination
//! - [`SearchQuery`] - free-text search over named fields

pub mod document;
mod id;
mod pagination;
mod search;

pub use document::{Company, Person, PersonWithCompany};
pub use id::{DocumentId, ID_BYTES};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageInfo, PageRequest};
pub use search::{DEFAULT_SEARCH_LIMIT, SearchQuery, field_contains};
