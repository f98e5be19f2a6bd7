use chrono::Duration;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};
use utility::serde::duration;

use crate::calendar::ServiceId;
use crate::route::RouteId;
use crate::stop::StopId;

pub type TripId = Id<Trip>;

/// A sequence of stop visits operated under one route and one service
/// calendar (§3). Exactly one route, exactly one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    pub service_id: ServiceId,
    pub trip_headsign: Option<String>,
}

impl HasId for Trip {
    type IdType = String;
}

/// A single scheduled call at a stop within a trip.
///
/// Invariants (enforced by the Schedule Store loader, §3/§8): for a given
/// `trip_id`, visits are totally ordered by `stop_sequence`;
/// `departure_time >= arrival_time`; consecutive visits' times are
/// monotonically non-decreasing. Times are seconds since the service day's
/// midnight and may be `>= 86400` for after-midnight operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopVisit {
    pub trip_id: TripId,
    pub stop_id: StopId,
    #[serde(serialize_with = "duration::serialize", deserialize_with = "duration::deserialize")]
    pub arrival_time: Duration,
    #[serde(serialize_with = "duration::serialize", deserialize_with = "duration::deserialize")]
    pub departure_time: Duration,
    pub stop_sequence: u32,
}

impl StopVisit {
    pub fn arrival_seconds(&self) -> i64 {
        self.arrival_time.num_seconds()
    }

    pub fn departure_seconds(&self) -> i64 {
        self.departure_time.num_seconds()
    }
}
