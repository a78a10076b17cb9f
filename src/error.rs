use std::path::PathBuf;

/// Reasons the projects file could not be turned into a table.
///
/// Every variant means the data is unavailable for this render: the shell
/// shows a warning instead of the map and the sidebar.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("{} not found. Please ensure the file is in the directory.", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("could not parse projects file: {0}")]
    Csv(#[from] csv::Error),
}

impl DataError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound { path }
        } else {
            DataError::Io { path, source }
        }
    }
}
