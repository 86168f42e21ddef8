//! Database schema definitions
//!
//! This module contains the SQL schema for the Ticket-Watch snapshot database.

/// SQL schema for the database
///
/// `timestamp` holds microseconds since the Unix epoch, `data` the JSON
/// encoded batch.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS snapshots (
    timestamp INTEGER PRIMARY KEY,
    data TEXT NOT NULL
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
