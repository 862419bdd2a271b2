use geo_types::Coord;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::time::ServiceTime;

pub type StopName = String;

/// Key of a selected trip: `(route_id, direction_id)`.
pub type DirectionKey = (String, String);

/// One representative trip per direction of each selected route.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectedTrips {
    pub by_direction: IndexMap<DirectionKey, String>,
    pub trip_ids: HashSet<String>,
}

impl SelectedTrips {
    /// Keeps the first trip seen for `key`, returns whether it was kept.
    pub fn insert_if_absent(&mut self, key: DirectionKey, trip_id: &str) -> bool {
        if self.by_direction.contains_key(&key) {
            return false;
        }
        self.by_direction.insert(key, trip_id.to_owned());
        self.trip_ids.insert(trip_id.to_owned());
        true
    }

    pub fn contains(&self, trip_id: &str) -> bool {
        self.trip_ids.contains(trip_id)
    }

    pub fn len(&self) -> usize {
        self.by_direction.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_direction.is_empty()
    }
}

/// Stop lookups restricted to the selected zones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StopIndex {
    pub name_by_id: HashMap<String, StopName>,
    pub coords_by_name: IndexMap<StopName, Coord<f64>>,
}

impl StopIndex {
    pub fn name(&self, stop_id: &str) -> Option<&StopName> {
        self.name_by_id.get(stop_id)
    }

    pub fn coord(&self, stop_name: &str) -> Option<Coord<f64>> {
        self.coords_by_name.get(stop_name).copied()
    }
}

/// A stop visited by a trip, with its raw clock texts.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub stop_name: StopName,
    pub arrival_time: String,
    pub departure_time: String,
}

impl Visit {
    pub fn arrival(&self) -> Option<ServiceTime> {
        self.arrival_time.parse().ok()
    }

    pub fn departure(&self) -> Option<ServiceTime> {
        self.departure_time.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripVisits {
    pub trip_id: String,
    pub visits: Vec<Visit>,
}

impl TripVisits {
    pub fn segments(&self) -> impl Iterator<Item = (&Visit, &Visit)> + '_ {
        self.visits.iter().zip(self.visits.iter().skip(1))
    }

    pub fn stop_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.visits.iter().map(|visit| visit.stop_name.as_str())
    }
}

/// Directed pair of consecutive stop names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    pub from: StopName,
    pub to: StopName,
}

impl Segment {
    pub fn new(from: impl Into<StopName>, to: impl Into<StopName>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<(&Visit, &Visit)> for Segment {
    fn from((from, to): (&Visit, &Visit)) -> Self {
        Segment::new(from.stop_name.as_str(), to.stop_name.as_str())
    }
}

/// Ordered visits per selected trip together with the averaged travel time
/// of every segment they produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SegmentTimes {
    pub trips: Vec<TripVisits>,
    pub averages: IndexMap<Segment, f64>,
    pub samples: usize,
    pub dropped: usize,
}

impl SegmentTimes {
    pub fn average(&self, from: &str, to: &str) -> Option<f64> {
        self.averages.get(&Segment::new(from, to)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn visit(stop_name: &str) -> Visit {
        Visit {
            stop_name: stop_name.to_owned(),
            arrival_time: String::new(),
            departure_time: String::new(),
        }
    }

    #[test]
    fn insert_if_absent_keeps_first_trip() {
        let mut selected = SelectedTrips::default();
        let key = ("L1".to_owned(), "0".to_owned());

        assert!(selected.insert_if_absent(key.clone(), "t1"));
        assert!(!selected.insert_if_absent(key.clone(), "t2"));

        assert_eq!(Some(&"t1".to_owned()), selected.by_direction.get(&key));
        assert!(selected.contains("t1"));
        assert!(!selected.contains("t2"));
        assert_eq!(1, selected.len());
    }

    #[test]
    fn trip_segments_are_consecutive_pairs() {
        let trip = TripVisits {
            trip_id: "t1".to_owned(),
            visits: vec![visit("A"), visit("B"), visit("C")],
        };

        let segments: Vec<Segment> = trip.segments().map(Segment::from).collect();
        assert_eq!(vec![Segment::new("A", "B"), Segment::new("B", "C")], segments);
    }

    #[test]
    fn single_visit_has_no_segment() {
        let trip = TripVisits {
            trip_id: "t1".to_owned(),
            visits: vec![visit("A")],
        };
        assert_eq!(0, trip.segments().count());
    }
}
