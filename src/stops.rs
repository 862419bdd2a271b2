use geo_types::Coord;
use itertools::Itertools;
use tracing::{info, trace};

use crate::{config::GraphConfig, data::StopIndex, gtfs};

/// Restricts stops to the selected zones and builds the id→name and
/// name→coordinate lookups. The first geocodable stop of a name wins.
pub fn index_stops(stops: &[gtfs::Stop], config: &GraphConfig) -> StopIndex {
    let mut index = StopIndex::default();

    for stop in stops
        .iter()
        .filter(|stop| config.selects_zone(&stop.zone_id) && !stop.stop_name.is_empty())
    {
        if !stop.stop_id.is_empty() {
            index
                .name_by_id
                .insert(stop.stop_id.clone(), stop.stop_name.clone());
        }

        if index.coords_by_name.contains_key(&stop.stop_name) {
            continue;
        }
        match parse_coord(&stop.stop_lon, &stop.stop_lat) {
            Some(coord) => {
                index.coords_by_name.insert(stop.stop_name.clone(), coord);
            }
            None => trace!(
                "Stop {:?} has no usable coordinates ({:?}, {:?})",
                stop.stop_id,
                stop.stop_lon,
                stop.stop_lat
            ),
        }
    }

    info!(
        "Indexed {} stops under {} names, {} geocoded",
        index.name_by_id.len(),
        index.name_by_id.values().unique().count(),
        index.coords_by_name.len()
    );
    index
}

fn parse_coord(lon: &str, lat: &str) -> Option<Coord<f64>> {
    let parse = |text: &str| -> Option<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    };
    Some(Coord {
        x: parse(lon)?,
        y: parse(lat)?,
    })
}
