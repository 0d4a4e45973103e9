//! HTTP request handlers for the person resource.
//!
//! - [`create`] - Create a person
//! - [`read`] - Read a person joined with its company
//! - [`update`] - Merge a partial update into a person
//! - [`delete`] - Delete a person
//! - [`list`] - List persons, newest first, one page at a time
//! - [`search`] - Free-text search over named fields
//! - [`health`] - Health check endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod search;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use read::read_handler;
pub use search::search_handler;
pub use update::update_handler;
