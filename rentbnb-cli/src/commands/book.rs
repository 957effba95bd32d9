//! Book command implementation.
//!
//! Prints the new reservation id and total, tab separated, so scripts can
//! pick them up.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_range, print_dry_run, GlobalOptions};
use clap::Args;
use rentbnb::operations::BookPlan;
use rentbnb::{BookingRequest, BookingService, CabinId, GuestId};

/// Book a cabin for a guest.
#[derive(Args)]
pub struct BookCommand {
    /// Cabin id
    #[arg(long)]
    pub cabin: i64,

    /// Guest id
    #[arg(long)]
    pub guest: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// Departure date (YYYY-MM-DD), exclusive
    #[arg(long, value_name = "DATE")]
    pub to: String,

    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Include breakfast
    #[arg(long)]
    pub breakfast: bool,

    /// Note from the guest
    #[arg(long)]
    pub note: Option<String>,

    /// Show the booking and its price without storing it
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = parse_range(&self.from, &self.to)?;
        let request = BookingRequest::new(
            CabinId::new(self.cabin),
            GuestId::new(self.guest),
            range,
            self.guests,
        )
        .with_addon(self.breakfast)
        .with_note(self.note);

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if self.dry_run {
            let plan = BookPlan::new(request, &config)?.build_plan(db.connection())?;
            print_dry_run(&plan, global);
            if let Some(booking) = plan.booking() {
                println!("-\t{}", booking.total_price());
            }
            return Ok(());
        }

        let reservation = BookingService::new(&mut db, &config).create(request)?;
        println!("{}\t{}", reservation.id(), reservation.total_price());

        Ok(())
    }
}
