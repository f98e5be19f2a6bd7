use serde::Deserialize;
use serde_repr::Deserialize_repr;
use utility::id::{HasId, Id};

use crate::database::WithPrimaryKey;

/// Indicates the type of transportation used on a route.
/// See <https://gtfs.org/schedule/reference/#routestxt>.
#[derive(Deserialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u16)]
pub enum RouteType {
    TramStreetcarOrLightRail = 0,
    SubwayOrMetro = 1,
    Rail = 2,
    Bus = 3,
    Ferry = 4,
    CableTram = 5,
    AerialLiftOrSuspendedCableCar = 6,
    Funicular = 7,
    Trolleybus = 11,
    Monorail = 12,
}

pub type RouteId = Id<RouteRow>;

/// A group of trips displayed to riders as a single service.
/// Primary key: `route_id`. See <https://gtfs.org/schedule/reference/#routestxt>.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRow {
    pub route_id: RouteId,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route_type: RouteType,
}

impl HasId for RouteRow {
    type IdType = String;
}

impl WithPrimaryKey<RouteId> for RouteRow {
    fn primary_key(&self) -> RouteId {
        self.route_id.clone()
    }
}
