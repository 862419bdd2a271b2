use std::collections::HashMap;

use geo_types::Coord;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use tracing::{debug, info};

use crate::data::{SegmentTimes, StopIndex, StopName};

#[derive(Debug, Clone, PartialEq)]
pub struct StopNode {
    pub name: StopName,
    pub coord: Option<Coord<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEdge {
    pub avg_time_min: f64,
}

/// Directed graph of stop names. At most one edge exists per ordered pair of
/// nodes; adding the same pair again overwrites its weight.
#[derive(Debug, Default, Clone)]
pub struct StopGraph {
    graph: DiGraph<StopNode, SegmentEdge>,
    index: HashMap<StopName, NodeIndex>,
}

impl StopGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_index(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(StopNode {
            name: name.to_owned(),
            coord: None,
        });
        self.index.insert(name.to_owned(), idx);
        idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str, avg_time_min: f64) {
        let from = self.node_index(from);
        let to = self.node_index(to);
        self.graph.update_edge(from, to, SegmentEdge { avg_time_min });
    }

    /// Sets the position of an existing node, returns false if absent.
    pub fn set_coord(&mut self, name: &str, coord: Coord<f64>) -> bool {
        match self.index.get(name) {
            Some(&idx) => {
                self.graph[idx].coord = Some(coord);
                true
            }
            None => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&StopNode> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&SegmentEdge> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| &self.graph[edge])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StopNode> + '_ {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &SegmentEdge)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].name.as_str(),
                self.graph[edge.target()].name.as_str(),
                edge.weight(),
            )
        })
    }

    pub fn as_graph(&self) -> &DiGraph<StopNode, SegmentEdge> {
        &self.graph
    }
}

/// Re-walks every trip and emits each consecutive pair with its averaged
/// travel time, then positions the nodes that have a geocode.
pub fn build_graph(segment_times: &SegmentTimes, stops: &StopIndex) -> StopGraph {
    let mut graph = StopGraph::new();

    for trip in &segment_times.trips {
        for (from, to) in trip.segments() {
            match segment_times.average(&from.stop_name, &to.stop_name) {
                Some(avg_time_min) => graph.add_edge(&from.stop_name, &to.stop_name, avg_time_min),
                None => debug!(
                    "Trip {:?}: no average for {:?} -> {:?}",
                    trip.trip_id, from.stop_name, to.stop_name
                ),
            }
        }
    }

    let mut geocoded = 0;
    for (name, coord) in &stops.coords_by_name {
        if graph.set_coord(name, *coord) {
            geocoded += 1;
        }
    }

    info!(
        "Built graph with {} nodes ({} geocoded) and {} edges",
        graph.node_count(),
        geocoded,
        graph.edge_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Segment, TripVisits, Visit};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn trip(trip_id: &str, names: &[&str]) -> TripVisits {
        TripVisits {
            trip_id: trip_id.to_owned(),
            visits: names
                .iter()
                .map(|name| Visit {
                    stop_name: name.to_string(),
                    arrival_time: String::new(),
                    departure_time: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn overwriting_an_edge_keeps_one_per_direction() {
        let mut graph = StopGraph::new();
        graph.add_edge("A", "B", 4.0);
        graph.add_edge("A", "B", 6.0);
        graph.add_edge("B", "A", 1.0);

        assert_eq!(2, graph.node_count());
        assert_eq!(2, graph.edge_count());
        assert_relative_eq!(6.0, graph.edge("A", "B").unwrap().avg_time_min);
        assert_relative_eq!(1.0, graph.edge("B", "A").unwrap().avg_time_min);
    }

    #[test]
    fn every_occurrence_uses_the_average() {
        let times = SegmentTimes {
            trips: vec![trip("t1", &["A", "B", "C"]), trip("t2", &["A", "B"])],
            averages: [(Segment::new("A", "B"), 5.0), (Segment::new("B", "C"), 2.0)]
                .into_iter()
                .collect(),
            ..SegmentTimes::default()
        };

        let graph = build_graph(&times, &StopIndex::default());

        assert_eq!(3, graph.node_count());
        assert_eq!(2, graph.edge_count());
        assert_relative_eq!(5.0, graph.edge("A", "B").unwrap().avg_time_min);
        assert_relative_eq!(2.0, graph.edge("B", "C").unwrap().avg_time_min);
        assert!(graph.edge("B", "A").is_none());
    }

    #[test]
    fn pairs_without_average_are_skipped() {
        let times = SegmentTimes {
            trips: vec![trip("t1", &["A", "B", "C"])],
            averages: [(Segment::new("B", "C"), 2.0)].into_iter().collect(),
            ..SegmentTimes::default()
        };

        let graph = build_graph(&times, &StopIndex::default());

        assert!(!graph.contains_node("A"));
        assert_eq!(1, graph.edge_count());
    }

    #[test]
    fn coordinates_only_on_known_nodes() {
        let times = SegmentTimes {
            trips: vec![trip("t1", &["A", "B"])],
            averages: [(Segment::new("A", "B"), 3.0)].into_iter().collect(),
            ..SegmentTimes::default()
        };
        let stops = StopIndex {
            coords_by_name: [
                ("A".to_owned(), Coord { x: 14.4, y: 50.1 }),
                ("Z".to_owned(), Coord { x: 14.0, y: 50.0 }),
            ]
            .into_iter()
            .collect(),
            ..StopIndex::default()
        };

        let graph = build_graph(&times, &stops);

        assert_eq!(Some(Coord { x: 14.4, y: 50.1 }), graph.node("A").unwrap().coord);
        assert_eq!(None, graph.node("B").unwrap().coord);
        assert!(!graph.contains_node("Z"));
    }

    #[test]
    fn edges_are_listed_by_name() {
        let mut graph = StopGraph::new();
        graph.add_edge("A", "B", 1.5);

        let edges: Vec<(&str, &str, f64)> = graph
            .edges()
            .map(|(from, to, edge)| (from, to, edge.avg_time_min))
            .collect();

        assert_eq!(vec![("A", "B", 1.5)], edges);
        assert_eq!(1, graph.as_graph().edge_count());
        assert_eq!(
            vec!["A", "B"],
            graph.nodes().map(|node| node.name.as_str()).collect::<Vec<_>>()
        );
    }
}
