use model::connection::Connection;
use model::itinerary::{IntermediateStop, Itinerary, Leg};
use model::stop::StopId;

use crate::graph::PlannerGraph;
use crate::scan::ScanResult;

/// A path-walk connection paired with the effective clock times it was
/// actually traversed at (`scan::PredecessorEntry` dereferenced into owned
/// fields for the grouping sweep below).
struct Traversal<'a> {
    connection: &'a Connection,
    departure_time: i64,
    arrival_time: i64,
}

fn stop_name(graph: &PlannerGraph, stop_id: &StopId) -> String {
    graph
        .get_stop(stop_id)
        .map(|s| s.stop_name.clone())
        .unwrap_or_else(|| stop_id.to_string())
}

fn intermediate_stop(graph: &PlannerGraph, stop_id: &StopId) -> IntermediateStop {
    let (lat, lon) = graph.get_stop(stop_id).map(|s| (s.lat, s.lon)).unwrap_or((0.0, 0.0));
    IntermediateStop {
        stop_id: stop_id.clone(),
        stop_name: stop_name(graph, stop_id),
        lat,
        lon,
    }
}

fn build_leg(graph: &PlannerGraph, group: &[Traversal]) -> Leg {
    let first = group[0].connection;
    let last = group[group.len() - 1].connection;

    let (trip_id, route_id, route_name, route_type, mode) = if first.is_transfer {
        (None, None, None, None, None)
    } else {
        let route = graph.get_route(&first.route_id, first.mode);
        let route_name = route.and_then(|r| {
            r.route_long_name
                .clone()
                .or_else(|| r.route_short_name.clone())
        });
        (
            Some(first.trip_id.clone()),
            Some(first.route_id.clone()),
            route_name,
            first.route_type,
            Some(first.mode),
        )
    };

    let intermediate_stops: Vec<IntermediateStop> = group[..group.len() - 1]
        .iter()
        .map(|t| intermediate_stop(graph, &t.connection.to_stop_id))
        .collect();

    Leg {
        from_stop_id: first.from_stop_id.clone(),
        from_stop_name: stop_name(graph, &first.from_stop_id),
        to_stop_id: last.to_stop_id.clone(),
        to_stop_name: stop_name(graph, &last.to_stop_id),
        departure_time: group[0].departure_time,
        arrival_time: group[group.len() - 1].arrival_time,
        trip_id,
        route_id,
        route_name,
        route_type,
        mode,
        is_transfer: first.is_transfer,
        num_stops: group.len() as u32 + 1,
        intermediate_stops,
        has_realtime_data: false,
        scheduled_departure: None,
        scheduled_arrival: None,
        actual_departure: None,
        actual_arrival: None,
        platform: None,
        is_cancelled: false,
    }
}

/// Back-traces `predecessor` from `destination` to `origin`, then sweeps
/// left-to-right grouping consecutive same-trip connections into legs. A
/// transfer connection always forms its own singleton leg, even when the
/// preceding or following connection shares the same sentinel trip id
/// (§4.6).
pub fn reconstruct(graph: &PlannerGraph, origin: &StopId, destination: &StopId, result: &ScanResult) -> Option<Itinerary> {
    let mut path: Vec<Traversal> = Vec::new();
    let mut current = destination.clone();
    while &current != origin {
        let entry = result.predecessor.get(&current)?;
        path.push(Traversal {
            connection: &entry.connection,
            departure_time: entry.departure_time,
            arrival_time: entry.arrival_time,
        });
        current = entry.connection.from_stop_id.clone();
    }
    path.reverse();

    if path.is_empty() {
        return None;
    }

    let mut legs = Vec::new();
    let mut group: Vec<Traversal> = Vec::new();
    for step in path {
        if step.connection.is_transfer {
            if !group.is_empty() {
                legs.push(build_leg(graph, &group));
                group.clear();
            }
            legs.push(build_leg(graph, std::slice::from_ref(&step)));
            continue;
        }
        match group.last() {
            Some(prev) if prev.connection.trip_id == step.connection.trip_id => group.push(step),
            Some(_) => {
                legs.push(build_leg(graph, &group));
                group = vec![step];
            }
            None => group = vec![step],
        }
    }
    if !group.is_empty() {
        legs.push(build_leg(graph, &group));
    }

    Some(Itinerary::from_legs(origin.clone(), destination.clone(), legs))
}
