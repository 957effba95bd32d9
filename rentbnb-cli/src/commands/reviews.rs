//! Command to list the reviews of a cabin, newest first.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::Args;
use rentbnb::{CabinId, Database, Error as LibError};

/// List the reviews of a cabin.
#[derive(Args)]
pub struct ReviewsCommand {
    /// Cabin id
    #[arg(long)]
    pub cabin: i64,
}

impl ReviewsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let cabin = CabinId::new(self.cabin);
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if Database::get_cabin(db.connection(), cabin)?.is_none() {
            return Err(LibError::NotFound {
                resource: format!("cabin {cabin}"),
            }
            .into());
        }

        println!("RESERVATION\tGUEST\tRATING\tUPDATED_AT\tCOMMENT");
        for review in Database::list_reviews_for_cabin(db.connection(), cabin)? {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                review.reservation_id,
                review.guest_id,
                review.rating.value(),
                format_timestamp(review.updated_at),
                review.comment
            );
        }

        Ok(())
    }
}
