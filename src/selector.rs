use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::{config::GraphConfig, data::SelectedTrips, gtfs};

/// Picks the first trip seen for each `(route_id, direction_id)` of the
/// routes whose `route_type` is selected.
pub fn select_trips(
    routes: &[gtfs::Route],
    trips: &[gtfs::Trip],
    config: &GraphConfig,
) -> SelectedTrips {
    let route_ids: HashSet<&str> = routes
        .iter()
        .filter(|route| config.selects_route_type(&route.route_type))
        .map(|route| route.route_id.as_str())
        .collect();

    let mut selected = SelectedTrips::default();
    for trip in trips
        .iter()
        .filter(|trip| route_ids.contains(trip.route_id.as_str()))
    {
        let key = (trip.route_id.clone(), trip.direction_id.clone());
        if !selected.insert_if_absent(key, &trip.trip_id) {
            debug!(
                "Trip {:?} skipped, route {:?} direction {:?} already has a trip",
                trip.trip_id, trip.route_id, trip.direction_id
            );
        }
    }

    if selected.is_empty() {
        warn!(
            "No trip selected for route types {:?}",
            config.route_types
        );
    }
    info!(
        "Selected {} trips from {} routes",
        selected.len(),
        route_ids.len()
    );
    selected
}
