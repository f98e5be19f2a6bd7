use std::collections::{HashMap, HashSet};

use model::connection::{Connection, ConnectionIndex};
use model::hub::TransferHub;
use model::mode::Mode;
use model::calendar::ServiceCalendar;
use model::error::PlannerResult;
use model::route::{Route, RouteId};
use model::stop::{Stop, StopId};
use model::trip::{StopVisit, Trip, TripId};
use utility::geo::{are_stops_nearby, calculate_bounding_box, haversine_m, walking_time_seconds};
use utility::id::Id;

use crate::aggregator::Aggregator;
use crate::stop_index::StopIndex;
use std::path::Path;

/// Shared `trip_id` stamped on every synthetic walking edge. Transfers have
/// no underlying GTFS trip, but `Connection::trip_id` is not optional, so a
/// single sentinel stands in — routing never looks it up as a real trip,
/// only compares it for trip-change detection (§4.4, §4.5).
pub const TRANSFER_TRIP_ID: &str = "TRANSFER";
pub const TRANSFER_ROUTE_ID: &str = "WALK";

const HUB_PROXIMITY_THRESHOLD_M: f64 = 100.0;

/// Builds the flat connection array and the transfer-hub set from an
/// [`Aggregator`] snapshot (§4.4). Stateless: every call recomputes from
/// scratch, matching "indices are never recomputed incrementally".
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(aggregator: &Aggregator) -> (ConnectionIndex, Vec<TransferHub>) {
        let mut connections = emit_scheduled_connections(aggregator);
        let hubs = discover_hubs(aggregator);
        connections.extend(synthesize_transfers(aggregator, &hubs));
        (ConnectionIndex::build(connections), hubs)
    }
}

fn emit_scheduled_connections(aggregator: &Aggregator) -> Vec<Connection> {
    let mut connections = Vec::new();

    for (&mode, store) in aggregator.stores() {
        for (trip_id, visits) in store.trip_schedules() {
            let Some(trip) = store.get_trip(trip_id) else {
                continue;
            };
            for pair in visits.windows(2) {
                let (from, to) = (&pair[0], &pair[1]);
                let departure = from.departure_seconds();
                let mut arrival = to.arrival_seconds();
                if arrival < departure {
                    // Trip extends past midnight of the service day, not the
                    // wall clock: keep growing rather than wrapping.
                    arrival += 86_400;
                }

                connections.push(Connection {
                    from_stop_id: from.stop_id.clone(),
                    to_stop_id: to.stop_id.clone(),
                    trip_id: trip_id.clone(),
                    route_id: trip.route_id.clone(),
                    route_type: store.get_route(&trip.route_id).map(|r| r.route_type),
                    mode,
                    departure_time: departure,
                    arrival_time: arrival,
                    travel_time_seconds: arrival - departure,
                    is_transfer: false,
                    service_id: Some(trip.service_id.clone()),
                });
            }
        }
    }

    connections
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Groups stops by normalized-name equality and by Haversine proximity
/// (§4.4 step 2); a group becomes a hub once it spans two or more distinct
/// modes. Name-unions run first so a later proximity merge lands in the
/// same component as "merge into an existing same-name hub if one exists".
fn discover_hubs(aggregator: &Aggregator) -> Vec<TransferHub> {
    let mut stops: Vec<_> = aggregator.stops().collect();
    stops.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
    let n = stops.len();
    let mut dsu = DisjointSet::new(n);

    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, stop) in stops.iter().enumerate() {
        let name = stop.normalized_name();
        if !name.is_empty() {
            by_name.entry(name).or_default().push(i);
        }
    }
    for indices in by_name.values() {
        for window in indices.windows(2) {
            dsu.union(window[0], window[1]);
        }
    }

    for i in 0..n {
        let (lat, lon) = (stops[i].lat, stops[i].lon);
        let ((south, west), (north, east)) =
            calculate_bounding_box(lat, lon, HUB_PROXIMITY_THRESHOLD_M / 1000.0);
        for j in (i + 1)..n {
            let candidate = stops[j];
            if candidate.lat < south || candidate.lat > north || candidate.lon < west || candidate.lon > east {
                continue;
            }
            if are_stops_nearby(lat, lon, candidate.lat, candidate.lon, HUB_PROXIMITY_THRESHOLD_M) {
                dsu.union(i, j);
            }
        }
    }

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for i in 0..n {
        let root = dsu.find(i);
        groups.entry(root).or_default().push(i);
    }

    let mut hubs = Vec::new();
    for members in groups.values() {
        let modes: HashSet<Mode> = members
            .iter()
            .filter_map(|&i| aggregator.mode_of(&stops[i].id))
            .collect();
        if modes.len() < 2 {
            continue;
        }

        let mut names: Vec<&str> = members
            .iter()
            .map(|&i| stops[i].stop_name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        let hub_name = names.first().map(|n| n.to_string()).unwrap_or_else(|| {
            format!("hub:{}", stops[members[0]].id)
        });

        let mut hub = TransferHub::new(hub_name);
        hub.members = members.iter().map(|&i| stops[i].id.clone()).collect();
        hubs.push(hub);
    }

    hubs.sort_by(|a, b| a.hub_name.cmp(&b.hub_name));
    hubs
}

/// Two directed walking edges per distinct stop pair within a hub (§4.4
/// step 3, §8 hub-symmetry property).
fn synthesize_transfers(aggregator: &Aggregator, hubs: &[TransferHub]) -> Vec<Connection> {
    let trip_id: TripId = Id::new(TRANSFER_TRIP_ID.to_owned());
    let route_id: RouteId = Id::new(TRANSFER_ROUTE_ID.to_owned());

    let mut transfers = Vec::new();
    for hub in hubs {
        let mut members: Vec<&StopId> = hub.members.iter().collect();
        members.sort_by(|a, b| a.to_string().cmp(&b.to_string()));

        for (i, &a) in members.iter().enumerate() {
            for &b in members.iter().skip(i + 1) {
                let (Some(stop_a), Some(stop_b)) = (aggregator.get_stop(a), aggregator.get_stop(b))
                else {
                    continue;
                };
                let distance = haversine_m(stop_a.lat, stop_a.lon, stop_b.lat, stop_b.lon);
                let travel_time = walking_time_seconds(distance);

                for (from, to, from_stop) in
                    [(a, b, stop_a), (b, a, stop_b)]
                {
                    let Some(mode) = aggregator.mode_of(&from_stop.id) else {
                        continue;
                    };
                    transfers.push(Connection {
                        from_stop_id: from.clone(),
                        to_stop_id: to.clone(),
                        trip_id: trip_id.clone(),
                        route_id: route_id.clone(),
                        route_type: None,
                        mode,
                        departure_time: 0,
                        arrival_time: travel_time,
                        travel_time_seconds: travel_time,
                        is_transfer: true,
                        service_id: None,
                    });
                }
            }
        }
    }
    transfers
}

/// The immutable, queryable snapshot a planner runs against: the merged
/// stop view, the flat connection array, the transfer hubs, and the fuzzy
/// name index built over it (§3 Lifecycles, §5 — "a reload constructs a
/// new set atomically and swaps a single shared reference").
pub struct PlannerGraph {
    aggregator: Aggregator,
    stop_index: StopIndex,
    connections: ConnectionIndex,
    hubs: Vec<TransferHub>,
}

impl PlannerGraph {
    pub fn build(dataset_root: &Path) -> PlannerResult<Self> {
        Self::from_aggregator(Aggregator::load(dataset_root)?)
    }

    pub fn from_aggregator(aggregator: Aggregator) -> Self {
        let stop_index = StopIndex::build(&aggregator);
        let (connections, hubs) = GraphBuilder::build(&aggregator);
        Self { aggregator, stop_index, connections, hubs }
    }

    pub fn connections(&self) -> &ConnectionIndex {
        &self.connections
    }

    pub fn hubs(&self) -> &[TransferHub] {
        &self.hubs
    }

    pub fn stop_index(&self) -> &StopIndex {
        &self.stop_index
    }

    pub fn get_stop(&self, id: &StopId) -> Option<&Stop> {
        self.aggregator.get_stop(id)
    }

    pub fn mode_of(&self, stop_id: &StopId) -> Option<Mode> {
        self.aggregator.mode_of(stop_id)
    }

    pub fn get_route(&self, route_id: &RouteId, mode: Mode) -> Option<&Route> {
        self.aggregator.get_route(route_id, mode)
    }

    pub fn get_trip(&self, trip_id: &TripId, mode: Mode) -> Option<&Trip> {
        self.aggregator.get_trip(trip_id, mode)
    }

    pub fn get_trip_stop_times(&self, trip_id: &TripId, mode: Mode) -> &[StopVisit] {
        self.aggregator.get_trip_stop_times(trip_id, mode)
    }

    pub fn calendar_for(&self, mode: Mode) -> Option<&ServiceCalendar> {
        self.aggregator.store(mode).map(|store| store.calendar())
    }
}
