//! Station catalog error types.

/// Errors that can occur when loading or reading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog has no source to reload from
    #[error("catalog has no source to reload from")]
    NoSource,

    /// Background load task failed
    #[error("catalog load task failed: {message}")]
    Task { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            CatalogError::NoSource.to_string(),
            "catalog has no source to reload from"
        );

        let err = CatalogError::Task {
            message: "panicked".into(),
        };
        assert_eq!(err.to_string(), "catalog load task failed: panicked");

        let err = CatalogError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "stations.csv",
        ));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
