use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to turn a selected file into a [`Table`](crate::table::Table).
///
/// Every variant is recoverable: the caller logs it and keeps whatever
/// view it was showing.
#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("cannot parse csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is not a spreadsheet file", path.display())]
    Unsupported { path: PathBuf },

    #[error("{} contains no data", path.display())]
    Empty { path: PathBuf },
}

impl FileLoadError {
    pub fn path(&self) -> &Path {
        match self {
            FileLoadError::Io { path, .. }
            | FileLoadError::Workbook { path, .. }
            | FileLoadError::Csv { path, .. }
            | FileLoadError::Unsupported { path }
            | FileLoadError::Empty { path } => path.as_path(),
        }
    }
}
