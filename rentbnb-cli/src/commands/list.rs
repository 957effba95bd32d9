//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use rentbnb::config::OutputFormat as ConfiguredFormat;
use rentbnb::database::ReservationFilter;
use rentbnb::{CabinId, Database, GuestId, Reservation, ReservationStatus};
use serde::Serialize;
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 10] = [
    "id",
    "cabin_id",
    "guest_id",
    "check_in",
    "check_out",
    "guests",
    "breakfast",
    "total_price",
    "status",
    "created_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (default: `output_format` from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only reservations in this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Only reservations of this cabin
    #[arg(long, value_name = "ID")]
    pub cabin: Option<i64>,

    /// Only reservations of this guest
    #[arg(long, value_name = "ID")]
    pub guest: Option<i64>,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<ConfiguredFormat> for OutputFormat {
    fn from(format: ConfiguredFormat) -> Self {
        match format {
            ConfiguredFormat::Table => Self::Table,
            ConfiguredFormat::Json => Self::Json,
            ConfiguredFormat::Csv => Self::Csv,
            ConfiguredFormat::Tsv => Self::Tsv,
        }
    }
}

/// One output row. Field order matches [`COLUMN_HEADERS`].
#[derive(Serialize)]
struct ReservationRow {
    id: i64,
    cabin_id: i64,
    guest_id: i64,
    check_in: String,
    check_out: String,
    guests: u32,
    breakfast: bool,
    total_price: String,
    status: ReservationStatus,
    created_at: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id().value(),
            cabin_id: r.cabin_id().value(),
            guest_id: r.guest_id().value(),
            check_in: r.range().start().to_string(),
            check_out: r.range().end().to_string(),
            guests: r.guests(),
            breakfast: r.booking().addon_included(),
            total_price: r.total_price().to_string(),
            status: r.status(),
            created_at: format_timestamp(r.booking().created_at()),
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let mut filter = ReservationFilter::new();
        if let Some(ref status) = self.status {
            let status = status
                .parse::<ReservationStatus>()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            filter = filter.with_status(status);
        }
        if let Some(cabin) = self.cabin {
            filter = filter.with_cabin(CabinId::new(cabin));
        }
        if let Some(guest) = self.guest {
            filter = filter.with_guest(GuestId::new(guest));
        }

        let db = open_database(global, &config)?;
        let rows: Vec<ReservationRow> = Database::list_reservations(db.connection(), &filter)?
            .iter()
            .map(ReservationRow::from)
            .collect();

        let format = self
            .format
            .or_else(|| config.output_format.map(OutputFormat::from))
            .unwrap_or(OutputFormat::Table);

        match format {
            OutputFormat::Table => format_as_table(&rows),
            OutputFormat::Json => format_as_json(&rows),
            OutputFormat::Csv => format_as_delimited(&rows, b','),
            OutputFormat::Tsv => format_as_delimited(&rows, b'\t'),
        }
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(rows: &[ReservationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.cabin_id,
            row.guest_id,
            row.check_in,
            row.check_out,
            row.guests,
            if row.breakfast { "yes" } else { "no" },
            row.total_price,
            row.status,
            row.created_at,
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(rows: &[ReservationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, rows)?;
    writeln!(handle)?;

    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[ReservationRow], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
