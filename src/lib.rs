//! Builds a directed graph of stop-to-stop segments, weighted by average
//! travel time, from the stops, routes, trips and stop times of a GTFS feed.
//!
//! The construction runs in four stages:
//! 1. [`selector::select_trips`] keeps one trip per route direction,
//! 2. [`stops::index_stops`] maps stop ids to names and names to coordinates,
//! 3. [`segments::aggregate_segments`] averages the travel time of each segment,
//! 4. [`graph::build_graph`] emits the averaged segments as edges.

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod gtfs;
pub mod read;
pub mod segments;
pub mod selector;
pub mod stops;
pub mod time;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{SegmentEdge, StopGraph, StopNode};
pub use gtfs::Feed;
pub use read::read_feed;

use tracing::info;

/// Builds the segment graph of `feed` restricted by `config`.
pub fn build(feed: &Feed, config: &GraphConfig) -> StopGraph {
    info!(
        "Building graph for route types {:?} and zones {:?}",
        config.route_types, config.zone_ids
    );
    let selected = selector::select_trips(&feed.routes, &feed.trips, config);
    let stops = stops::index_stops(&feed.stops, config);
    let segment_times = segments::aggregate_segments(&feed.stop_times, &selected, &stops);
    graph::build_graph(&segment_times, &stops)
}
