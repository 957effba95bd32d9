//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_dry_run, GlobalOptions};
use clap::Args;
use rentbnb::operations::DeletePlan;
use rentbnb::{Actor, BookingService, ReservationId};

/// Delete a reservation together with its review. Staff only.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    pub id: i64,

    /// Show what would be deleted without deleting it
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = ReservationId::new(self.id);
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if self.dry_run {
            let plan = DeletePlan::new(id, Actor::Operator).build_plan(db.connection())?;
            print_dry_run(&plan, global);
            return Ok(());
        }

        BookingService::new(&mut db, &config).delete(id, Actor::Operator)?;
        if !global.quiet {
            eprintln!("Deleted reservation {id}");
        }

        Ok(())
    }
}
