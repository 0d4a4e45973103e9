//! Application-defined SQL functions.

use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::{Connection, Error};
use serde_json::Value;

use crate::types::field_contains;

/// `person_search(data, text, field, ...)`: true if any named field of the
/// JSON document in `data` holds a string containing `text`, ignoring case.
pub(crate) const PERSON_SEARCH: &str = "person_search";

/// Registers the functions on a newly opened connection.
pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        PERSON_SEARCH,
        -1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        person_search,
    )
}

fn person_search(ctx: &Context<'_>) -> rusqlite::Result<bool> {
    if ctx.len() < 3 {
        return Err(Error::UserFunctionError(
            format!("{PERSON_SEARCH} expects a document, a text and at least one field").into(),
        ));
    }

    let data: String = ctx.get(0)?;
    let text: String = ctx.get(1)?;
    let document: Value =
        serde_json::from_str(&data).map_err(|e| Error::UserFunctionError(Box::new(e)))?;

    for i in 2..ctx.len() {
        let field: String = ctx.get(i)?;
        if field_contains(&document, &field, &text) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();
        conn
    }

    fn search(conn: &Connection, data: &str, text: &str, field: &str) -> bool {
        conn.query_row(
            "SELECT person_search(?1, ?2, ?3)",
            [data, text, field],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_person_search_folds_unicode_case() {
        let conn = connection();
        assert!(search(&conn, r#"{"name":"ÉMILE Zola"}"#, "émile", "name"));
        assert!(!search(&conn, r#"{"name":"ÉMILE Zola"}"#, "emily", "name"));
    }

    #[test]
    fn test_person_search_any_field() {
        let conn = connection();
        let found: bool = conn
            .query_row(
                "SELECT person_search(?1, 'alpha', 'name', 'email')",
                [r#"{"name":"Bob","email":"bob@alpha.io"}"#],
                |row| row.get(0),
            )
            .unwrap();
        assert!(found);
    }

    #[test]
    fn test_person_search_odd_field_names_never_fail() {
        let conn = connection();
        for field in ["a\\", "a[0", "a]", "a'b", "#", "na\"me"] {
            assert!(!search(&conn, r#"{"name":"Alice"}"#, "ali", field));
        }
    }

    #[test]
    fn test_person_search_requires_a_field() {
        let conn = connection();
        let result: rusqlite::Result<bool> =
            conn.query_row("SELECT person_search('{}', 'x')", [], |row| row.get(0));
        assert!(result.is_err());
    }
}
