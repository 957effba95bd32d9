//! Check-in command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use rentbnb::{BookingService, ReservationId};

/// Check a guest in.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation id
    pub id: i64,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = BookingService::new(&mut db, &config).check_in(ReservationId::new(self.id))?;
        println!("{}\t{}", reservation.id(), reservation.status());

        Ok(())
    }
}
