//! Response formatting.
//!
//! Every endpoint answers with the same JSON [`Envelope`]:
//!
//! ```json
//! { "success": true, "result": ..., "message": "...", "pagination": { ... } }
//! ```
//!
//! `pagination` only appears on list responses.

pub mod envelope;
pub mod messages;

pub use envelope::Envelope;
