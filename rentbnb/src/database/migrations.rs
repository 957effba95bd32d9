//! Database schema management and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CABINS_TABLE, CREATE_CABIN_STATUS_INDEX, CREATE_GUEST_INDEX, CREATE_METADATA_TABLE,
    CREATE_RESERVATIONS_TABLE, CREATE_REVIEWS_TABLE, CREATE_REVIEW_CABIN_INDEX,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, METADATA_TABLE_EXISTS, SELECT_SCHEMA_VERSION,
};

/// Creates all tables and indices and records the schema version.
///
/// Every statement is idempotent, so two processes racing to initialize
/// the same fresh file both succeed.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use rentbnb::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    log::debug!("initializing schema version {CURRENT_SCHEMA_VERSION}");

    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> rusqlite::Result<()> {
        for statement in [
            CREATE_METADATA_TABLE,
            CREATE_CABINS_TABLE,
            CREATE_RESERVATIONS_TABLE,
            CREATE_REVIEWS_TABLE,
            CREATE_CABIN_STATUS_INDEX,
            CREATE_GUEST_INDEX,
            CREATE_REVIEW_CABIN_INDEX,
        ] {
            conn.execute(statement, [])?;
        }
        conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
        Ok(())
    })();

    match result {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(e) => {
            conn.execute_batch("ROLLBACK")?;
            return Err(e.into());
        }
    }
    Ok(())
}

/// Gets the schema version, or 0 for an uninitialized database.
///
/// # Errors
///
/// Returns an error if the query fails or the stored version is not a
/// number.
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    let has_metadata: i64 = conn.query_row(METADATA_TABLE_EXISTS, [], |row| row.get(0))?;
    if has_metadata == 0 {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema version '{value}' is not a number"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes a fresh database.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the file was written by a
/// different schema version, or a database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
