use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::route::RouteId;
use crate::stop::StopId;
use crate::trip::TripId;

/// An intermediate call a leg passes through, with coordinates attached
/// (§4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntermediateStop {
    pub stop_id: StopId,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// One contiguous run of connections a passenger stays aboard, or a single
/// synthetic walking edge (§3, §4.6). The realtime overlay fields are set by
/// C7 and left at their defaults until then.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub from_stop_id: StopId,
    pub from_stop_name: String,
    pub to_stop_id: StopId,
    pub to_stop_name: String,
    pub departure_time: i64,
    pub arrival_time: i64,
    pub trip_id: Option<TripId>,
    pub route_id: Option<RouteId>,
    pub route_name: Option<String>,
    pub route_type: Option<crate::route::RouteType>,
    pub mode: Option<Mode>,
    pub is_transfer: bool,
    pub num_stops: u32,
    pub intermediate_stops: Vec<IntermediateStop>,

    // Realtime overlay (§4.7), absent until `apply_realtime` runs.
    pub has_realtime_data: bool,
    pub scheduled_departure: Option<i64>,
    pub scheduled_arrival: Option<i64>,
    pub actual_departure: Option<i64>,
    pub actual_arrival: Option<i64>,
    pub platform: Option<String>,
    pub is_cancelled: bool,
}

impl Leg {
    /// The time a rider would actually experience, preferring the realtime
    /// overlay when present (§4.7).
    pub fn effective_departure(&self) -> i64 {
        self.actual_departure.unwrap_or(self.departure_time)
    }

    pub fn effective_arrival(&self) -> i64 {
        self.actual_arrival.unwrap_or(self.arrival_time)
    }
}

/// An ordered sequence of legs from origin to destination — the router's
/// answer (§3).
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub origin: StopId,
    pub destination: StopId,
    pub departure_time: i64,
    pub arrival_time: i64,
    pub legs: Vec<Leg>,
    pub duration_minutes: i64,
    pub num_transfers: u32,
    pub modes_used: Vec<Mode>,

    // Realtime overlay (§4.7).
    pub is_valid: bool,
    pub validity_message: Option<String>,
}

impl Itinerary {
    /// Itinerary-level `departure_time`/`arrival_time` come from the first
    /// and last non-transfer legs, so walking-only padding never skews the
    /// reported window (§3). Falls back to the first/last leg overall if
    /// every leg happens to be a transfer (should not occur, §4.6).
    pub fn from_legs(origin: StopId, destination: StopId, legs: Vec<Leg>) -> Self {
        let non_transfer: Vec<&Leg> = legs.iter().filter(|leg| !leg.is_transfer).collect();
        let (departure_time, arrival_time) = match (non_transfer.first(), non_transfer.last()) {
            (Some(first), Some(last)) => (first.departure_time, last.arrival_time),
            _ => (
                legs.first().map(|l| l.departure_time).unwrap_or_default(),
                legs.last().map(|l| l.arrival_time).unwrap_or_default(),
            ),
        };

        let num_transfers = count_transfers(&legs);

        let mut seen_modes = std::collections::HashSet::new();
        let modes_used: Vec<Mode> = legs
            .iter()
            .filter_map(|leg| leg.mode)
            .filter(|mode| seen_modes.insert(*mode))
            .collect();

        let duration_minutes = ((arrival_time - departure_time) as f64 / 60.0).round() as i64;

        Self {
            origin,
            destination,
            departure_time,
            arrival_time,
            legs,
            duration_minutes,
            num_transfers,
            modes_used,
            is_valid: true,
            validity_message: None,
        }
    }

    /// Every stop visited by this itinerary, used by k-alternative search's
    /// Jaccard-overlap rejection (§4.5).
    pub fn stop_set(&self) -> std::collections::HashSet<StopId> {
        let mut stops = std::collections::HashSet::new();
        for leg in &self.legs {
            stops.insert(leg.from_stop_id.clone());
            stops.insert(leg.to_stop_id.clone());
        }
        stops
    }
}

/// Counts a transfer the way §4.5/§4.6's reconstruction-fidelity rule does:
/// every transfer leg counts, and so does a non-transfer leg immediately
/// following another non-transfer leg on a different trip.
fn count_transfers(legs: &[Leg]) -> u32 {
    let mut count = 0;
    for window in legs.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if b.is_transfer {
            count += 1;
        } else if !a.is_transfer && a.trip_id != b.trip_id {
            count += 1;
        }
    }
    count
}
