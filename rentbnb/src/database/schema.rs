//! Database schema definitions and SQL constants.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, which sorts and compares in
//! calendar order. Money is stored as decimal text so no precision is lost.
//! Timestamps are whole seconds since the Unix epoch.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key/value table for versioning.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Cabin inventory.
pub const CREATE_CABINS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS cabins (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        cabin_number TEXT NOT NULL UNIQUE,
        capacity INTEGER NOT NULL CHECK (capacity >= 1),
        price_per_night TEXT NOT NULL,
        description TEXT,
        amenities TEXT,
        image_url TEXT,
        created_at INTEGER NOT NULL
    )";

/// Reservations. The range is half-open: `check_in <= night < check_out`.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cabin_id INTEGER NOT NULL REFERENCES cabins(id),
        guest_id INTEGER NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        num_guests INTEGER NOT NULL CHECK (num_guests >= 1),
        breakfast_included INTEGER NOT NULL,
        total_price TEXT NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('unconfirmed', 'checked_in', 'checked_out', 'cancelled')),
        note TEXT,
        created_at INTEGER NOT NULL,
        CHECK (check_in < check_out)
    )";

/// Reviews; at most one per reservation.
pub const CREATE_REVIEWS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL UNIQUE
            REFERENCES reservations(id) ON DELETE CASCADE,
        guest_id INTEGER NOT NULL,
        cabin_id INTEGER NOT NULL,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        comment TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Speeds up the per-cabin blocking lookup used by every booking.
pub const CREATE_CABIN_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_cabin_status ON reservations(cabin_id, status)";

/// Speeds up a guest's reservation list.
pub const CREATE_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id)";

/// Speeds up a cabin's review list.
pub const CREATE_REVIEW_CABIN_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reviews_cabin ON reviews(cabin_id)";

/// Checks whether the metadata table exists yet.
pub const METADATA_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'";

/// Reads the stored schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
