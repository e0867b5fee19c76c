//! CSV station import.
//!
//! The expected layout is one station per row:
//!
//! ```text
//! station_cd,station_name,lat,lon,line_name,pref_cd
//! 1130101,Tokyo,35.681391,139.766103,JR Yamanote Line,13
//! ```
//!
//! The header row is skipped. Rows that are too short, have unparseable
//! numbers or carry out-of-range coordinates are skipped and counted rather
//! than failing the whole import.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::domain::{Coordinate, Station, StationId};

use super::error::CatalogError;

/// Minimum number of columns a station row must have.
const MIN_COLUMNS: usize = 6;

/// Outcome of a CSV import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Stations in file order.
    pub stations: Vec<Arc<Station>>,
    /// Number of data rows that were skipped.
    pub skipped: usize,
}

/// Import stations from any CSV reader.
pub fn import_csv<R: Read>(reader: R) -> Result<ImportReport, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut report = ImportReport::default();

    for record in reader.records() {
        let record = record?;
        match parse_row(&record) {
            Some(station) => report.stations.push(Arc::new(station)),
            None => {
                report.skipped += 1;
                debug!(
                    line = record.position().map(|p| p.line()).unwrap_or_default(),
                    "Skipping malformed station row"
                );
            }
        }
    }

    Ok(report)
}

/// Import stations from a CSV file on disk.
pub fn import_csv_file(path: impl AsRef<Path>) -> Result<ImportReport, CatalogError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let report = import_csv(std::io::BufReader::new(file))?;

    info!(
        path = %path.display(),
        stations = report.stations.len(),
        skipped = report.skipped,
        "Imported station catalog"
    );

    Ok(report)
}

/// Parse one data row, or `None` if it is not a usable station.
fn parse_row(record: &StringRecord) -> Option<Station> {
    if record.len() < MIN_COLUMNS {
        return None;
    }

    let id = record.get(0)?.parse::<u32>().ok()?;
    let name = record.get(1)?;
    let lat = record.get(2)?.parse::<f64>().ok()?;
    let lon = record.get(3)?.parse::<f64>().ok()?;
    let line = record.get(4)?;
    let region_code = record.get(5)?.parse::<u16>().ok()?;

    let location = Coordinate::new(lat, lon).ok()?;

    Some(Station::new(StationId(id), name, location, line, region_code))
}
