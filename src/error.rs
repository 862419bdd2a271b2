use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required feed files in {dir:?}: {}", .files.join(", "))]
    MissingFiles { dir: PathBuf, files: Vec<String> },

    #[error("Failed to read {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid service-day time {0:?}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
