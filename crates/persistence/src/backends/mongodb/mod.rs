//! MongoDB backend implementation.
//!
//! Persons live in the `persons` collection and companies in `companies`.
//! Reads join the two with a `$lookup` aggregation; search uses
//! case-insensitive `$regex` matching on an escaped pattern.
//!
//! # Example
//!
//! ```no_run
//! use roster_persistence::backends::mongodb::MongoBackend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MongoBackend::connect("mongodb://localhost:27017", "roster").await?;
//! backend.init_schema().await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod convert;
mod storage;

pub use backend::MongoBackend;
