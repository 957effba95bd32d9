//! Quote command implementation.

use crate::error::CliError;
use crate::utils::{format_money, load_configuration, open_database, parse_range, GlobalOptions};
use clap::Args;
use rentbnb::{BookingService, CabinId};

/// Price a stay without booking it.
#[derive(Args)]
pub struct QuoteCommand {
    /// Cabin id
    #[arg(long)]
    pub cabin: i64,

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
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = parse_range(&self.from, &self.to)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let quote = BookingService::new(&mut db, &config).quote(
            CabinId::new(self.cabin),
            &range,
            self.guests,
            self.breakfast,
        )?;

        println!(
            "Lodging:   {} x {} night(s) = {}",
            quote.nightly_rate,
            quote.nights,
            format_money(quote.lodging, &config)
        );
        if self.breakfast {
            println!(
                "Breakfast: {} guest(s) x {} night(s) = {}",
                quote.guests,
                quote.nights,
                format_money(quote.addon, &config)
            );
        }
        println!("Total:     {}", format_money(quote.total, &config));

        Ok(())
    }
}
