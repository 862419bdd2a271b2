use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use crate::{
    error::{Error, Result},
    gtfs::Feed,
};

pub const STOPS_FILE: &str = "stops.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const ROUTES_FILE: &str = "routes.txt";

pub const REQUIRED_FILES: [&str; 4] = [STOPS_FILE, STOP_TIMES_FILE, TRIPS_FILE, ROUTES_FILE];

fn deserialize_into<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_error = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };
    let records = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(csv_error)?;
    info!("Read {} rows from {:?}", records.len(), path);
    Ok(records)
}

/// Reads the four feed files from `dir`. Nothing is parsed unless all of
/// them exist.
pub fn read_feed(dir: impl AsRef<Path>) -> Result<Feed> {
    let dir = dir.as_ref();
    let missing: Vec<String> = REQUIRED_FILES
        .iter()
        .filter(|name| !dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingFiles {
            dir: dir.to_path_buf(),
            files: missing,
        });
    }

    let path = |name: &str| -> PathBuf { dir.join(name) };
    Ok(Feed {
        stops: deserialize_into(&path(STOPS_FILE))?,
        routes: deserialize_into(&path(ROUTES_FILE))?,
        trips: deserialize_into(&path(TRIPS_FILE))?,
        stop_times: deserialize_into(&path(STOP_TIMES_FILE))?,
    })
}
