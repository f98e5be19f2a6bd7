use chrono::NaiveDate;
use model::calendar::{CalendarWindow, ServiceId};
use serde::{Deserialize, Deserializer};
use utility::serde::date_time::deserialize_yyyymmdd;

use crate::database::WithPrimaryKey;

/// GTFS encodes the weekday availability columns as `0`/`1`, not `true`/`false`.
fn deserialize_bool_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u8::deserialize(deserializer)? != 0)
}

/// Service dates specified using a weekly schedule with start and end dates.
///
/// Conditionally Required:
/// - **Required** unless all dates of service are defined in calendar_dates.txt.
/// - Optional otherwise.
///
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarRow {
    pub service_id: ServiceId,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub monday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub tuesday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub wednesday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub thursday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub friday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub saturday: bool,
    #[serde(deserialize_with = "deserialize_bool_flag")]
    pub sunday: bool,
    #[serde(deserialize_with = "deserialize_yyyymmdd")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_yyyymmdd")]
    pub end_date: NaiveDate,
}

impl WithPrimaryKey<ServiceId> for CalendarRow {
    fn primary_key(&self) -> ServiceId {
        self.service_id.clone()
    }
}

impl From<CalendarRow> for CalendarWindow {
    fn from(row: CalendarRow) -> Self {
        CalendarWindow {
            service_id: row.service_id,
            monday: row.monday,
            tuesday: row.tuesday,
            wednesday: row.wednesday,
            thursday: row.thursday,
            friday: row.friday,
            saturday: row.saturday,
            sunday: row.sunday,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}
