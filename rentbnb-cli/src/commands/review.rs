//! Review command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use rentbnb::{Actor, BookingService, GuestId, Rating, ReservationId};

/// Review a checked-out stay. Submitting again replaces the review.
#[derive(Args)]
pub struct ReviewCommand {
    /// Reservation id
    pub id: i64,

    /// The reviewing guest
    #[arg(long)]
    pub guest: i64,

    /// Stars, 1 to 5
    #[arg(long)]
    pub rating: i64,

    /// Free-text comment
    #[arg(long, default_value = "")]
    pub comment: String,
}

impl ReviewCommand {
    /// Execute the review command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let rating = Rating::new(self.rating)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let review = BookingService::new(&mut db, &config).submit_review(
            ReservationId::new(self.id),
            Actor::Guest(GuestId::new(self.guest)),
            rating,
            &self.comment,
        )?;
        println!("{}\t{}", review.id, review.rating);

        Ok(())
    }
}
