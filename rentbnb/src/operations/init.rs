//! Data directory and database initialization.

use std::fs;
use std::path::PathBuf;

use crate::config::loader::USER_CONFIG_FILE;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};

/// Options for database initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a starter `config.yaml` next to the database.
    pub create_config: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl InitOptions {
    /// Creates options that only create a missing database.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            dry_run: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a starter configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What initialization did (or, for a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResult {
    /// The data directory was created.
    pub data_dir_created: bool,
    /// The database was created or recreated.
    pub database_created: bool,
    /// A configuration file was written.
    pub config_created: bool,
    /// The data directory.
    pub data_dir: PathBuf,
    /// The database file.
    pub database_path: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# rentbnb configuration
#
# Values here are overridden by rentbnb.yaml / rentbnb.local.yaml files
# found from the working directory upwards, and by RENTBNB_* variables.

pricing:
  # Breakfast price per guest per night
  addon_rate_per_guest_per_night: 15
  # Label printed next to amounts
  currency: USD

# Seconds to wait for the database write lock (default: 5)
# maximum_lock_wait_seconds: 5

# Default format for `rentbnb list` (table, json, csv, tsv)
# output_format: table
";

/// Creates the data directory and database, and optionally a starter
/// configuration file. An existing configuration file is never replaced.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the database exists and `overwrite` is
/// not set, or an I/O or database error.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use rentbnb::operations::{init_database, InitOptions};
///
/// let options = InitOptions::new(PathBuf::from("/tmp/rentbnb")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let database_path = options.data_dir.join(DATABASE_FILE);
    let config_path = options.data_dir.join(USER_CONFIG_FILE);
    let db_exists = database_path.exists();

    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                database_path.display()
            ),
        });
    }

    let result = InitResult {
        data_dir_created: !options.data_dir.exists(),
        database_created: true,
        config_created: options.create_config && !config_path.exists(),
        data_dir: options.data_dir.clone(),
        database_path: database_path.clone(),
    };
    if options.dry_run {
        return Ok(result);
    }

    if result.data_dir_created {
        fs::create_dir_all(&options.data_dir)?;
    }
    if db_exists {
        log::info!("removing existing database {}", database_path.display());
        fs::remove_file(&database_path)?;
        // Stale WAL files would be replayed into the new database
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = database_path.clone().into_os_string();
            sidecar.push(suffix);
            let sidecar = PathBuf::from(sidecar);
            if sidecar.exists() {
                fs::remove_file(&sidecar)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&database_path))?;
    log::info!("initialized database {}", database_path.display());

    if result.config_created {
        fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
    }

    Ok(result)
}
