//! Response messages.
//!
//! Clients match on these strings, so they are kept byte-for-byte stable
//! (including the trailing space on [`CREATED`]).

/// Create succeeded.
pub const CREATED: &str = "Successfully Created the document in Model ";

/// The payload failed schema validation or was not a JSON object.
pub const VALIDATION_FAILED: &str = "Required fields are not supplied";

/// Any unclassified failure.
pub const INTERNAL_ERROR: &str = "Oops there is an Error";

/// List or search produced results.
pub const FOUND_ALL: &str = "Successfully found all documents";

/// List found an empty collection.
pub const COLLECTION_EMPTY: &str = "Collection is Empty";

/// Search had no query or no match.
pub const NO_MATCH: &str = "No document found by this request";

/// The request body exceeded the size limit.
pub const PAYLOAD_TOO_LARGE: &str = "Request body is too large";

/// The request did not finish in time.
pub const TIMED_OUT: &str = "Request timed out";

/// No document has the requested id.
pub fn not_found(id: &str) -> String {
    format!("No document found by this id: {}", id)
}

/// Read succeeded.
pub fn found(id: &str) -> String {
    format!("we found this document by this id: {}", id)
}

/// Update succeeded.
pub fn updated(id: &str) -> String {
    format!("we update this document by this id: {}", id)
}

/// Delete succeeded.
pub fn deleted(id: &str) -> String {
    format!("Successfully Deleted the document by id: {}", id)
}
