use chrono::Duration;
use serde::Deserialize;
use utility::serde::duration;

use crate::database::WithPrimaryKey;

use super::{stops::StopId, trips::TripId};

pub type StopTimeKey = (TripId, u32);

/// Times that a vehicle arrives at and departs from stops for each trip.
/// Primary key: `(trip_id, stop_sequence)`.
/// See <https://gtfs.org/schedule/reference/#stop_timestxt>.
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRow {
    pub trip_id: TripId,
    pub stop_id: StopId,
    #[serde(deserialize_with = "duration::deserialize")]
    pub arrival_time: Duration,
    #[serde(deserialize_with = "duration::deserialize")]
    pub departure_time: Duration,
    pub stop_sequence: u32,
}

impl WithPrimaryKey<StopTimeKey> for StopTimeRow {
    fn primary_key(&self) -> StopTimeKey {
        (self.trip_id.clone(), self.stop_sequence)
    }
}
