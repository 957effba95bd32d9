//! Cancel command implementation.
//!
//! A guest may cancel only their own reservation; `--operator` may cancel
//! any.

use crate::error::CliError;
use crate::utils::{actor, load_configuration, open_database, print_dry_run, GlobalOptions};
use clap::Args;
use rentbnb::operations::{TransitionOptions, TransitionPlan};
use rentbnb::{BookingService, ReservationId};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    pub id: i64,

    /// Cancel as this guest
    #[arg(long, conflicts_with = "operator", required_unless_present = "operator")]
    pub guest: Option<i64>,

    /// Cancel as staff
    #[arg(long)]
    pub operator: bool,

    /// Show what would change without changing it
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = actor(self.guest, self.operator)?;
        let id = ReservationId::new(self.id);
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if self.dry_run {
            let plan = TransitionPlan::new(TransitionOptions::cancel(id, actor))
                .build_plan(db.connection())?;
            print_dry_run(&plan, global);
            return Ok(());
        }

        let reservation = BookingService::new(&mut db, &config).cancel(id, actor)?;
        println!("{}\t{}", reservation.id(), reservation.status());

        Ok(())
    }
}
