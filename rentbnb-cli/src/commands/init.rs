//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the rentbnb data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use rentbnb::operations::{init_database, InitOptions};

/// Initialize rentbnb data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; initializing is the point.
    /// `--data-dir` names the directory to create.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_dry_run(self.dry_run);

        let result = init_database(&options).map_err(CliError::from)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize rentbnb in: {}", result.data_dir.display());
            if result.data_dir_created {
                println!("  - Create data directory: {}", result.data_dir.display());
            }
            if self.overwrite && result.database_path.exists() {
                println!("  - Remove existing database: {}", result.database_path.display());
            }
            println!("  - Create database: {}", result.database_path.display());
            if result.config_created {
                println!("  - Create configuration file");
            } else if self.with_config {
                println!("  - Configuration file already exists (will not overwrite)");
            }
            return Ok(());
        }

        println!("Initialized rentbnb in: {}", result.data_dir.display());

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
