//! Command to display one reservation and its review.

use crate::error::CliError;
use crate::utils::{format_money, format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::Args;
use rentbnb::{Database, Error as LibError, ReservationId};

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    pub id: i64,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = ReservationId::new(self.id);
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservation = Database::get_reservation(db.connection(), id)?.ok_or_else(|| {
            CliError::from(LibError::NotFound {
                resource: format!("reservation {id}"),
            })
        })?;
        let booking = reservation.booking();

        println!("Reservation: {}", reservation.id());
        println!("Status:      {}", reservation.status());
        println!("Cabin:       {}", reservation.cabin_id());
        println!("Guest:       {}", reservation.guest_id());
        println!(
            "Stay:        {} to {} ({} night(s))",
            reservation.range().start(),
            reservation.range().end(),
            reservation.range().nights()
        );
        println!("Guests:      {}", reservation.guests());
        println!(
            "Breakfast:   {}",
            if booking.addon_included() { "yes" } else { "no" }
        );
        println!("Total:       {}", format_money(reservation.total_price(), &config));
        println!("Note:        {}", booking.note().unwrap_or("-"));
        println!("Booked at:   {}", format_timestamp(booking.created_at()));

        if let Some(review) = Database::get_review(db.connection(), id)? {
            println!("Review:      {} {}", review.rating, review.comment);
        }

        Ok(())
    }
}
