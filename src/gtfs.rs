use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub zone_id: String,
    pub stop_lon: String,
    pub stop_lat: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Route {
    pub route_id: String,
    pub route_type: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Trip {
    pub route_id: String,
    pub trip_id: String,
    pub direction_id: String,
}

/// `stop_sequence` is kept as text; the aggregator parses it and drops
/// rows where it is not an unsigned integer.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: String,
}

/// The four parsed collections a graph is built from, in source order.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
}
