use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

pub type RouteId = Id<Route>;

/// A group of trips displayed to riders as a single service. Immutable (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub route_long_name: Option<String>,
    pub route_short_name: Option<String>,
    pub route_type: RouteType,
}

impl HasId for Route {
    type IdType = String;
}

/// GTFS `route_type` codes this planner's four modes can emit.
/// See <https://gtfs.org/schedule/reference/#routestxt>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RouteType {
    TramStreetcarLightRail,
    SubwayMetro,
    Rail,
    Bus,
    Ferry,
    Other(u16),
}

impl From<RouteType> for u16 {
    fn from(value: RouteType) -> Self {
        match value {
            RouteType::TramStreetcarLightRail => 0,
            RouteType::SubwayMetro => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::Other(code) => code,
        }
    }
}

impl TryFrom<u16> for RouteType {
    type Error = std::convert::Infallible;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => RouteType::TramStreetcarLightRail,
            1 => RouteType::SubwayMetro,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            other => RouteType::Other(other),
        })
    }
}
