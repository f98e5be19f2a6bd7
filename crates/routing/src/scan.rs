use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use model::connection::Connection;
use model::mode::Mode;
use model::stop::StopId;
use model::trip::TripId;

use crate::graph::PlannerGraph;

/// Time window (seconds) within which the router first looks for same-day
/// service before falling back to the overnight/next-available tiers
/// (§4.5).
const SEARCH_HORIZON_SECONDS: i64 = 4 * 3600;
const NEXT_AVAILABLE_MAX_DAYS: i64 = 7;
const NEXT_AVAILABLE_CONNECTION_CAP: usize = 1000;

/// A connection identified by the triple the k-alternative search bans
/// after picking a journey's longest leg (§4.5).
pub type BanKey = (StopId, StopId, TripId);

/// A predecessor entry pairs the connection taken with the clock times it
/// was actually traversed at. For scheduled connections these equal
/// `conn.departure_time`/`conn.arrival_time`; a transfer's stored times are
/// a fixed "available any time" placeholder (§4.4), so its *effective*
/// departure/arrival are computed dynamically at relaxation time instead
/// (§4.5 phase 2, mirroring the original's `dep_time = earliest_arrival[from]`).
pub struct PredecessorEntry {
    pub connection: Connection,
    pub departure_time: i64,
    pub arrival_time: i64,
}

pub struct ScanResult {
    pub predecessor: HashMap<StopId, PredecessorEntry>,
    pub earliest_arrival: HashMap<StopId, i64>,
}

struct ScanState {
    earliest_arrival: HashMap<StopId, i64>,
    predecessor: HashMap<StopId, PredecessorEntry>,
    current_trip: HashMap<StopId, Option<TripId>>,
    transfers_used: HashMap<StopId, u32>,
}

impl ScanState {
    fn seeded_at(origin: &StopId, seed_seconds: i64) -> Self {
        let mut current_trip = HashMap::new();
        current_trip.insert(origin.clone(), None);
        let mut transfers_used = HashMap::new();
        transfers_used.insert(origin.clone(), 0);
        let mut earliest_arrival = HashMap::new();
        earliest_arrival.insert(origin.clone(), seed_seconds);
        Self {
            earliest_arrival,
            predecessor: HashMap::new(),
            current_trip,
            transfers_used,
        }
    }

    fn arrival_at(&self, stop: &StopId) -> Option<i64> {
        self.earliest_arrival.get(stop).copied()
    }

    /// Relaxes one connection against the current state, rejecting it if
    /// doing so would exceed `max_transfers` (§4.5 phase 1/2). A transfer's
    /// effective departure/arrival are computed from the current arrival at
    /// its `from_stop`, not from its stored placeholder times (§4.4, §4.5).
    fn relax(&mut self, conn: &Connection, max_transfers: u32) -> bool {
        let Some(from_arrival) = self.arrival_at(&conn.from_stop_id) else {
            return false;
        };

        let (departure_time, arrival_time) = if conn.is_transfer {
            (from_arrival, from_arrival + conn.travel_time_seconds)
        } else {
            if conn.departure_time < from_arrival {
                return false;
            }
            (conn.departure_time, conn.arrival_time)
        };

        let improves = self
            .arrival_at(&conn.to_stop_id)
            .map(|current| arrival_time < current)
            .unwrap_or(true);
        if !improves {
            return false;
        }

        let from_trip = self.current_trip.get(&conn.from_stop_id).cloned().flatten();
        let is_changing_trip = matches!(&from_trip, Some(trip) if *trip != conn.trip_id);
        let transfers = self.transfers_used.get(&conn.from_stop_id).copied().unwrap_or(0)
            + if is_changing_trip { 1 } else { 0 };
        if transfers > max_transfers {
            return false;
        }

        self.earliest_arrival.insert(conn.to_stop_id.clone(), arrival_time);
        self.predecessor.insert(
            conn.to_stop_id.clone(),
            PredecessorEntry { connection: conn.clone(), departure_time, arrival_time },
        );
        self.current_trip.insert(conn.to_stop_id.clone(), Some(conn.trip_id.clone()));
        self.transfers_used.insert(conn.to_stop_id.clone(), transfers);
        true
    }
}

fn scan_scheduled(
    state: &mut ScanState,
    connections: &[&Connection],
    destination: &StopId,
    max_transfers: u32,
) {
    for conn in connections {
        if state.arrival_at(&conn.from_stop_id).is_none() {
            continue;
        }
        if let Some(dest_arrival) = state.arrival_at(destination) {
            if conn.departure_time > dest_arrival {
                break;
            }
        }
        state.relax(conn, max_transfers);
    }
}

/// One calendar tier's scheduled-connection slice plus the day it was
/// filtered against and the seconds-since-midnight the search should seed
/// the origin at for that day (§4.5 calendar filtering). The three tiers
/// are tried independently in sequence; the first non-empty slice wins.
struct Tier<'a> {
    connections: Vec<&'a Connection>,
    origin_seed: i64,
}

fn select_tier<'a>(
    graph: &'a PlannerGraph,
    departure_date: NaiveDate,
    departure_seconds: i64,
    same_mode_only: Option<Mode>,
) -> Tier<'a> {
    let scheduled = |conn: &&Connection| {
        conn.is_scheduled() && same_mode_only.map(|m| conn.mode == m).unwrap_or(true)
    };

    let start = graph.connections().partition_point_from(departure_seconds);
    let today: Vec<&Connection> = graph
        .connections()
        .as_slice()[start..]
        .iter()
        .filter(|c| scheduled(c))
        .filter(|c| c.departure_time < 86_400)
        .filter(|c| operates_on(graph, c, departure_date))
        .collect();
    if !today.is_empty() {
        return Tier { connections: today, origin_seed: departure_seconds };
    }

    if departure_seconds + SEARCH_HORIZON_SECONDS > 86_400 {
        let tomorrow = departure_date + Duration::days(1);
        let max_time_tomorrow = departure_seconds + SEARCH_HORIZON_SECONDS - 86_400;
        let overnight: Vec<&Connection> = graph
            .connections()
            .as_slice()
            .iter()
            .filter(|c| scheduled(c))
            .filter(|c| c.departure_time >= 0 && c.departure_time <= max_time_tomorrow)
            .filter(|c| operates_on(graph, c, tomorrow))
            .collect();
        if !overnight.is_empty() {
            return Tier { connections: overnight, origin_seed: 0 };
        }
    }

    for days_ahead in 1..=NEXT_AVAILABLE_MAX_DAYS {
        let future_date = departure_date + Duration::days(days_ahead);
        let mut future: Vec<&Connection> = graph
            .connections()
            .as_slice()
            .iter()
            .filter(|c| scheduled(c))
            .filter(|c| operates_on(graph, c, future_date))
            .collect();
        if !future.is_empty() {
            future.truncate(NEXT_AVAILABLE_CONNECTION_CAP);
            return Tier { connections: future, origin_seed: 0 };
        }
    }

    Tier { connections: Vec::new(), origin_seed: departure_seconds }
}

fn operates_on(graph: &PlannerGraph, conn: &Connection, date: NaiveDate) -> bool {
    let Some(service_id) = &conn.service_id else {
        return true;
    };
    graph
        .calendar_for(conn.mode)
        .map(|calendar| calendar.operates_on(service_id, date))
        .unwrap_or(false)
}

fn transfer_connections(graph: &PlannerGraph, same_mode_only: Option<Mode>) -> Vec<&Connection> {
    graph
        .connections()
        .as_slice()
        .iter()
        .filter(|c| c.is_transfer)
        .filter(|c| same_mode_only.map(|m| c.mode == m).unwrap_or(true))
        .collect()
}

/// Runs the full Connection Scan (§4.5): calendar tier selection, the main
/// scan over scheduled connections, then up to `min(3, max_transfers + 1)`
/// transfer-relaxation rounds, stopping early once a round improves
/// nothing. `banned` excludes specific `(from, to, trip_id)` triples for
/// k-alternative search.
pub fn scan(
    graph: &PlannerGraph,
    origin: &StopId,
    destination: &StopId,
    departure: NaiveDateTime,
    max_transfers: u32,
    banned: &HashSet<BanKey>,
    same_mode_only: Option<Mode>,
) -> Option<ScanResult> {
    let departure_date = departure.date();
    let departure_seconds = departure.num_seconds_from_midnight() as i64;

    let tier = select_tier(graph, departure_date, departure_seconds, same_mode_only);
    let scheduled: Vec<&Connection> = tier
        .connections
        .into_iter()
        .filter(|c| !banned.contains(&(c.from_stop_id.clone(), c.to_stop_id.clone(), c.trip_id.clone())))
        .collect();
    let transfers: Vec<&Connection> = transfer_connections(graph, same_mode_only)
        .into_iter()
        .filter(|c| !banned.contains(&(c.from_stop_id.clone(), c.to_stop_id.clone(), c.trip_id.clone())))
        .collect();

    let mut state = ScanState::seeded_at(origin, tier.origin_seed);
    scan_scheduled(&mut state, &scheduled, destination, max_transfers);

    let rounds = (max_transfers + 1).min(3);
    for _ in 0..rounds {
        let mut improvements = 0;
        for conn in &transfers {
            if state.relax(conn, max_transfers) {
                improvements += 1;
            }
        }
        if improvements == 0 {
            break;
        }
        scan_scheduled(&mut state, &scheduled, destination, max_transfers);
    }

    if !state.predecessor.contains_key(destination) {
        return None;
    }
    Some(ScanResult {
        predecessor: state.predecessor,
        earliest_arrival: state.earliest_arrival,
    })
}
