//! Station catalog: CSV import, shared in-memory storage and
//! nearest-station lookup.
//!
//! The catalog is loaded from CSV at startup and can be reloaded in the
//! background. The planner only ever reads snapshots of it.

mod catalog;
mod error;
mod import;
mod nearest;

pub use catalog::{SharedCatalog, StationCatalog};
pub use error::CatalogError;
pub use import::{ImportReport, import_csv, import_csv_file};
pub use nearest::{NearbyStation, nearest_stations, nearest_with_distance};
