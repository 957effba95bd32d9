//! Cabin management commands.
//!
//! `cabin add|edit|remove|list|show`. Cabins are addressed by their id;
//! `add` prints the new id on stdout.

use crate::error::CliError;
use crate::utils::{format_money, load_configuration, open_database, parse_amount, GlobalOptions};
use clap::{Args, Subcommand};
use rentbnb::{CabinDetails, CabinId, Database, Error as LibError};

/// Manage cabins.
#[derive(Subcommand)]
pub enum CabinCommand {
    /// Add a cabin
    Add(CabinAddCommand),

    /// Change a cabin's details
    Edit(CabinEditCommand),

    /// Remove a cabin that has never been booked
    Remove(CabinIdArg),

    /// List all cabins
    List,

    /// Show one cabin
    Show(CabinShowArg),
}

/// Fields for `cabin add`.
#[derive(Args)]
pub struct CabinAddCommand {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unique cabin number, e.g. 001
    #[arg(long, value_name = "NUMBER")]
    pub number: String,

    /// Maximum number of guests
    #[arg(long)]
    pub capacity: u32,

    /// Nightly rate
    #[arg(long, value_name = "AMOUNT")]
    pub price: String,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Free-text amenities
    #[arg(long)]
    pub amenities: Option<String>,

    /// Image location
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,
}

/// Fields for `cabin edit`. Omitted fields keep their value.
#[derive(Args)]
pub struct CabinEditCommand {
    /// Cabin id
    pub id: i64,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Unique cabin number
    #[arg(long, value_name = "NUMBER")]
    pub number: Option<String>,

    /// Maximum number of guests
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Nightly rate for future bookings
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Free-text amenities
    #[arg(long)]
    pub amenities: Option<String>,

    /// Image location
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,
}

/// A cabin id argument.
#[derive(Args)]
pub struct CabinIdArg {
    /// Cabin id
    pub id: i64,
}

/// Selects a cabin by id or by its number.
#[derive(Args)]
pub struct CabinShowArg {
    /// Cabin id
    #[arg(required_unless_present = "number", conflicts_with = "number")]
    pub id: Option<i64>,

    /// Cabin number, e.g. 001
    #[arg(long, value_name = "NUMBER")]
    pub number: Option<String>,
}

impl CabinCommand {
    /// Execute the selected cabin subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            CabinCommand::Add(cmd) => {
                let details = CabinDetails::builder(
                    cmd.name,
                    cmd.number,
                    cmd.capacity,
                    parse_amount("price", &cmd.price)?,
                )
                .description(cmd.description)
                .amenities(cmd.amenities)
                .image_url(cmd.image_url)
                .build()?;
                let cabin = db.insert_cabin(&details)?;
                println!("{}", cabin.id());
            }
            CabinCommand::Edit(cmd) => {
                let id = CabinId::new(cmd.id);
                let current = find_cabin(&db, id)?;
                let mut builder = current.details().to_builder();
                if let Some(name) = cmd.name {
                    builder = builder.name(name);
                }
                if let Some(number) = cmd.number {
                    builder = builder.cabin_number(number);
                }
                if let Some(capacity) = cmd.capacity {
                    builder = builder.capacity(capacity);
                }
                if let Some(price) = cmd.price {
                    builder = builder.price_per_night(parse_amount("price", &price)?);
                }
                if cmd.description.is_some() {
                    builder = builder.description(cmd.description);
                }
                if cmd.amenities.is_some() {
                    builder = builder.amenities(cmd.amenities);
                }
                if cmd.image_url.is_some() {
                    builder = builder.image_url(cmd.image_url);
                }
                let updated = db.update_cabin(id, &builder.build()?)?;
                if !global.quiet {
                    eprintln!("Updated cabin {} ({})", updated.id(), updated.cabin_number());
                }
            }
            CabinCommand::Remove(arg) => {
                db.delete_cabin(CabinId::new(arg.id))?;
                if !global.quiet {
                    eprintln!("Removed cabin {}", arg.id);
                }
            }
            CabinCommand::List => {
                println!("ID\tNUMBER\tNAME\tCAPACITY\tPRICE");
                for cabin in Database::list_cabins(db.connection())? {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        cabin.id(),
                        cabin.cabin_number(),
                        cabin.name(),
                        cabin.capacity(),
                        cabin.price_per_night()
                    );
                }
            }
            CabinCommand::Show(arg) => {
                let cabin = match (arg.id, arg.number) {
                    (Some(id), _) => find_cabin(&db, CabinId::new(id))?,
                    (None, Some(number)) => {
                        Database::find_cabin_by_number(db.connection(), &number)?.ok_or_else(
                            || {
                                CliError::from(LibError::NotFound {
                                    resource: format!("cabin number {number}"),
                                })
                            },
                        )?
                    }
                    (None, None) => {
                        return Err(CliError::InvalidArguments(
                            "specify a cabin id or --number".to_string(),
                        ))
                    }
                };
                let details = cabin.details();
                println!("Cabin:       {} ({})", cabin.cabin_number(), cabin.id());
                println!("Name:        {}", cabin.name());
                println!("Capacity:    {}", cabin.capacity());
                println!("Price/night: {}", format_money(cabin.price_per_night(), &config));
                println!("Description: {}", details.description().unwrap_or("-"));
                println!("Amenities:   {}", details.amenities().unwrap_or("-"));
                println!("Image:       {}", details.image_url().unwrap_or("-"));
            }
        }

        Ok(())
    }
}

fn find_cabin(db: &Database, id: CabinId) -> Result<rentbnb::Cabin, CliError> {
    Database::get_cabin(db.connection(), id)?.ok_or_else(|| {
        CliError::from(LibError::NotFound {
            resource: format!("cabin {id}"),
        })
    })
}
