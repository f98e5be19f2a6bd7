use serde::{Deserialize, Serialize};

use crate::calendar::ServiceId;
use crate::mode::Mode;
use crate::route::{RouteId, RouteType};
use crate::stop::StopId;
use crate::trip::TripId;

/// The central flat record on which routing operates (§3). One edge per
/// consecutive pair of scheduled visits within a trip, or one synthetic
/// walking edge between two stops belonging to the same transfer hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub from_stop_id: StopId,
    pub to_stop_id: StopId,
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub route_type: Option<RouteType>,
    pub mode: Mode,
    /// Seconds since the service day's midnight; `0` for transfer edges.
    pub departure_time: i64,
    pub arrival_time: i64,
    pub travel_time_seconds: i64,
    pub is_transfer: bool,
    pub service_id: Option<ServiceId>,
}

impl Connection {
    pub fn is_scheduled(&self) -> bool {
        !self.is_transfer
    }
}

/// The flat, immutable, chronologically sorted array of all connections
/// across all modes (§3). Sort key: `(departure_time ascending, is_transfer
/// descending)` — transfers sort before scheduled connections at the same
/// departure second.
#[derive(Debug, Clone, Default)]
pub struct ConnectionIndex {
    connections: Vec<Connection>,
}

impl ConnectionIndex {
    pub fn build(mut connections: Vec<Connection>) -> Self {
        connections.sort_by(|a, b| {
            a.departure_time
                .cmp(&b.departure_time)
                .then_with(|| b.is_transfer.cmp(&a.is_transfer))
        });
        Self { connections }
    }

    pub fn as_slice(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Index of the first connection whose `departure_time >= from_seconds`,
    /// via binary search over the sorted array (connections with equal
    /// departure time are all included since the search then scans forward).
    pub fn partition_point_from(&self, from_seconds: i64) -> usize {
        self.connections
            .partition_point(|c| c.departure_time < from_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utility::id::Id;

    fn conn(departure: i64, is_transfer: bool) -> Connection {
        Connection {
            from_stop_id: Id::new("a".to_owned()),
            to_stop_id: Id::new("b".to_owned()),
            trip_id: Id::new("t".to_owned()),
            route_id: Id::new("r".to_owned()),
            route_type: None,
            mode: Mode::Bus,
            departure_time: departure,
            arrival_time: departure + 60,
            travel_time_seconds: 60,
            is_transfer,
            service_id: None,
        }
    }

    #[test]
    fn sorts_by_departure_then_transfers_first() {
        let index = ConnectionIndex::build(vec![
            conn(100, false),
            conn(100, true),
            conn(50, false),
        ]);
        let times: Vec<(i64, bool)> = index
            .as_slice()
            .iter()
            .map(|c| (c.departure_time, c.is_transfer))
            .collect();
        assert_eq!(times, vec![(50, false), (100, true), (100, false)]);
    }
}
