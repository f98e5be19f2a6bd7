use serde::Deserialize;
use utility::id::{HasId, Id};

use crate::database::WithPrimaryKey;

use super::routes::RouteId;

pub type TripId = Id<TripRow>;

/// A sequence of two or more stops occurring during a specific time period.
/// Primary key: `trip_id`. See <https://gtfs.org/schedule/reference/#tripstxt>.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRow {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub service_id: String,
    pub trip_headsign: Option<String>,
}

impl HasId for TripRow {
    type IdType = String;
}

impl WithPrimaryKey<TripId> for TripRow {
    fn primary_key(&self) -> TripId {
        self.trip_id.clone()
    }
}
