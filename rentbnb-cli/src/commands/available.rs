//! Command to check whether a cabin is free for a stay.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_range, GlobalOptions};
use clap::Args;
use rentbnb::{BookingService, CabinId};

/// Check whether a cabin is free for the given dates.
#[derive(Args)]
pub struct AvailableCommand {
    /// Cabin id
    #[arg(long)]
    pub cabin: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// Departure date (YYYY-MM-DD), exclusive
    #[arg(long, value_name = "DATE")]
    pub to: String,
}

impl AvailableCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = parse_range(&self.from, &self.to)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let cabin = CabinId::new(self.cabin);
        if BookingService::new(&mut db, &config).is_available(cabin, &range)? {
            if !global.quiet {
                println!("available");
            }
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "cabin {cabin} is not available for {range}"
            )))
        }
    }
}
