use serde::Deserialize;

use super::{routes::RouteId, stops::StopId, trips::TripId};

pub type TransferKey = (
    Option<StopId>,
    Option<StopId>,
    Option<TripId>,
    Option<TripId>,
    Option<RouteId>,
    Option<RouteId>,
);

/// Rules for making connections at transfer points between routes.
/// Loaded for completeness with the rest of the static feed, but not
/// consumed by the connection graph: multimodal transfers are synthesized
/// from hub proximity, and same-route interchanges fall out of the scan
/// itself. See <https://gtfs.org/schedule/reference/#transferstxt>.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRow {
    pub from_stop_id: Option<StopId>,
    pub to_stop_id: Option<StopId>,
    pub from_route_id: Option<RouteId>,
    pub to_route_id: Option<RouteId>,
    pub from_trip_id: Option<TripId>,
    pub to_trip_id: Option<TripId>,
    pub min_transfer_time: Option<u32>,
}

impl TransferRow {
    pub fn key(&self) -> TransferKey {
        (
            self.from_stop_id.clone(),
            self.to_stop_id.clone(),
            self.from_trip_id.clone(),
            self.to_trip_id.clone(),
            self.from_route_id.clone(),
            self.to_route_id.clone(),
        )
    }
}

impl crate::database::WithPrimaryKey<TransferKey> for TransferRow {
    fn primary_key(&self) -> TransferKey {
        self.key()
    }
}
