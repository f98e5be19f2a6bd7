use serde::Deserialize;
use serde_repr::Deserialize_repr;
use utility::id::{HasId, Id};

use crate::database::WithPrimaryKey;

use super::{IdString, Latitude, Longitude};

/// Location Type. See <https://gtfs.org/schedule/reference/#stopstxt>.
#[derive(Deserialize_repr, PartialEq, Debug, Clone, Copy, Default)]
#[repr(u8)]
pub enum LocationType {
    #[default]
    StopOrPlatform = 0,
    Station = 1,
    EntranceExit = 2,
    GenericNode = 3,
    BoardingArea = 4,
}

pub type StopId = Id<StopRow>;

/// Stops where vehicles pick up or drop off riders.
/// Primary key: `stop_id`. See <https://gtfs.org/schedule/reference/#stopstxt>.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRow {
    pub stop_id: StopId,
    pub stop_name: String,
    #[serde(rename = "stop_lat")]
    pub lat: Latitude,
    #[serde(rename = "stop_lon")]
    pub lon: Longitude,
    pub platform_code: Option<String>,
    pub parent_station: Option<IdString>,
    #[serde(default)]
    pub location_type: Option<LocationType>,
}

impl HasId for StopRow {
    type IdType = String;
}

impl WithPrimaryKey<StopId> for StopRow {
    fn primary_key(&self) -> StopId {
        self.stop_id.clone()
    }
}
