//! Station catalog access.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;

use super::error::CatalogError;
use super::import::import_csv_file;

/// Trait for reading the station catalog.
///
/// The planner asks for a fresh snapshot on every search and never writes
/// to it.
pub trait StationCatalog {
    /// Every known station, in catalog order.
    fn all_stations(&self) -> impl Future<Output = Result<Vec<Arc<Station>>, CatalogError>> + Send;
}

/// Thread-safe in-memory station catalog.
///
/// Readers get a cheap snapshot (a vector of `Arc`s); a reload swaps the
/// whole list at once, so a search never sees a half-loaded catalog.
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Vec<Arc<Station>>>>,
    source: Option<PathBuf>,
}

impl SharedCatalog {
    /// Create a catalog holding the given stations, with no reload source.
    pub fn new(stations: Vec<Arc<Station>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(stations)),
            source: None,
        }
    }

    /// Create an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a CSV file, remembering the path for reloads.
    pub fn load_csv(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let report = import_csv_file(&path)?;

        Ok(Self {
            inner: Arc::new(RwLock::new(report.stations)),
            source: Some(path),
        })
    }

    /// The CSV file this catalog reloads from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get the number of stations in the catalog.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Replace the catalog contents.
    pub async fn replace(&self, stations: Vec<Arc<Station>>) {
        let mut guard = self.inner.write().await;
        *guard = stations;
    }

    /// Reload the catalog from its CSV source.
    ///
    /// On success, replaces the current stations and returns the new count.
    /// On failure, the existing stations are preserved and the error is
    /// returned.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let path = self.source.clone().ok_or(CatalogError::NoSource)?;

        let report = tokio::task::spawn_blocking(move || import_csv_file(path))
            .await
            .map_err(|e| CatalogError::Task {
                message: e.to_string(),
            })??;

        let count = report.stations.len();
        self.replace(report.stations).await;

        Ok(count)
    }
}

impl StationCatalog for SharedCatalog {
    async fn all_stations(&self) -> Result<Vec<Arc<Station>>, CatalogError> {
        Ok(self.inner.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "station_cd,station_name,lat,lon,line_name,pref_cd";

    fn station(id: u32) -> Arc<Station> {
        Arc::new(Station::new(
            StationId(id),
            format!("Station {id}"),
            Coordinate::new(35.68, 139.77).unwrap(),
            "Line",
            13,
        ))
    }

    #[tokio::test]
    async fn snapshot_keeps_order() {
        let catalog = SharedCatalog::new(vec![station(3), station(1), station(2)]);
        let stations = catalog.all_stations().await.unwrap();

        let ids: Vec<u32> = stations.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(catalog.len().await, 3);
    }

    #[tokio::test]
    async fn empty_catalog() {
        let catalog = SharedCatalog::empty();
        assert!(catalog.is_empty().await);
        assert!(catalog.all_stations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_swaps_contents() {
        let catalog = SharedCatalog::new(vec![station(1)]);
        let before = catalog.all_stations().await.unwrap();

        catalog.replace(vec![station(2), station(3)]).await;

        // Earlier snapshots are unaffected
        assert_eq!(before.len(), 1);
        assert_eq!(catalog.len().await, 2);
    }

    #[tokio::test]
    async fn reload_without_source_fails() {
        let catalog = SharedCatalog::new(vec![station(1)]);
        assert!(matches!(
            catalog.reload().await,
            Err(CatalogError::NoSource)
        ));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn load_and_reload_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,Tokyo,35.681391,139.766103,Yamanote,13").unwrap();
        file.flush().unwrap();

        let catalog = SharedCatalog::load_csv(file.path()).unwrap();
        assert_eq!(catalog.len().await, 1);
        assert_eq!(catalog.source(), Some(file.path()));

        writeln!(file, "2,Kanda,35.691690,139.770883,Yamanote,13").unwrap();
        file.flush().unwrap();

        let count = catalog.reload().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(catalog.len().await, 2);
    }

    #[tokio::test]
    async fn failed_reload_keeps_existing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,Tokyo,35.681391,139.766103,Yamanote,13").unwrap();
        file.flush().unwrap();

        let catalog = SharedCatalog::load_csv(file.path()).unwrap();
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());

        assert!(matches!(catalog.reload().await, Err(CatalogError::Io(_))));
        assert_eq!(catalog.len().await, 1);
    }
}
