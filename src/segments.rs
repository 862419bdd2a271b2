use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, info, trace};

use crate::{
    data::{Segment, SegmentTimes, SelectedTrips, StopIndex, TripVisits, Visit},
    gtfs,
};

/// Orders the visits of every selected trip and averages, per directed pair
/// of consecutive stop names, the travel time from departure to the next
/// arrival.
///
/// Samples whose times do not parse, or whose duration is negative, are
/// dropped. Every remaining sample weighs the same in the mean.
pub fn aggregate_segments(
    stop_times: &[gtfs::StopTime],
    selected: &SelectedTrips,
    stops: &StopIndex,
) -> SegmentTimes {
    let trips = order_visits(stop_times, selected, stops);

    let mut samples: IndexMap<Segment, Vec<f64>> = IndexMap::new();
    let mut dropped = 0;
    for trip in &trips {
        for (current, next) in trip.segments() {
            match travel_minutes(current, next) {
                Some(minutes) => samples
                    .entry(Segment::from((current, next)))
                    .or_default()
                    .push(minutes),
                None => {
                    trace!(
                        "Trip {:?}: no sample for {:?} -> {:?} ({:?} -> {:?})",
                        trip.trip_id,
                        current.stop_name,
                        next.stop_name,
                        current.departure_time,
                        next.arrival_time
                    );
                    dropped += 1;
                }
            }
        }
    }

    let kept: usize = samples.values().map(Vec::len).sum();
    let averages: IndexMap<Segment, f64> = samples
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(segment, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (segment, mean)
        })
        .collect();

    info!(
        "Averaged {} segments over {} trips ({} samples kept, {} dropped)",
        averages.len(),
        trips.len(),
        kept,
        dropped
    );

    SegmentTimes {
        trips,
        averages,
        samples: kept,
        dropped,
    }
}

/// Visits of every selected trip whose stop is indexed, ordered by trip id
/// then numeric stop sequence.
pub fn order_visits(
    stop_times: &[gtfs::StopTime],
    selected: &SelectedTrips,
    stops: &StopIndex,
) -> Vec<TripVisits> {
    stop_times
        .iter()
        .filter(|stop_time| selected.contains(&stop_time.trip_id))
        .filter_map(|stop_time| {
            let stop_name = stops.name(&stop_time.stop_id)?;
            match stop_time.stop_sequence.trim().parse::<i64>() {
                Ok(sequence) => Some((sequence, stop_name, stop_time)),
                Err(_) => {
                    debug!(
                        "Trip {:?}: stop time at {:?} dropped, invalid stop_sequence {:?}",
                        stop_time.trip_id, stop_time.stop_id, stop_time.stop_sequence
                    );
                    None
                }
            }
        })
        .sorted_by(|(a_seq, _, a), (b_seq, _, b)| {
            a.trip_id.cmp(&b.trip_id).then(a_seq.cmp(b_seq))
        })
        .chunk_by(|(_, _, stop_time)| stop_time.trip_id.clone())
        .into_iter()
        .map(|(trip_id, group)| TripVisits {
            trip_id,
            visits: group
                .map(|(_, stop_name, stop_time)| Visit {
                    stop_name: stop_name.clone(),
                    arrival_time: stop_time.arrival_time.clone(),
                    departure_time: stop_time.departure_time.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Minutes from `current`'s departure to `next`'s arrival, `None` when either
/// time is unparseable or the result is negative.
fn travel_minutes(current: &Visit, next: &Visit) -> Option<f64> {
    let (departure, arrival) = (current.departure()?, next.arrival()?);
    let minutes = departure.minutes_until(arrival);
    if minutes < 0.0 {
        trace!(
            "Negative duration from {:?} at {} to {:?} at {}",
            current.stop_name,
            departure,
            next.stop_name,
            arrival
        );
        return None;
    }
    Some(minutes)
}
