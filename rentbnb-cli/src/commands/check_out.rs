//! Check-out command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use rentbnb::{BookingService, ReservationId};

/// Check a guest out.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation id
    pub id: i64,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = BookingService::new(&mut db, &config).check_out(ReservationId::new(self.id))?;
        println!("{}\t{}", reservation.id(), reservation.status());

        Ok(())
    }
}
