use chrono::NaiveDate;
use model::calendar::{CalendarException, ExceptionKind, ServiceId};
use serde::Deserialize;
use serde_repr::Deserialize_repr;
use utility::serde::date_time::deserialize_yyyymmdd;

use crate::database::WithPrimaryKey;

/// Indicates whether service is available on the date specified in the date field.
/// See <https://gtfs.org/schedule/reference/#calendar_datestxt>
#[derive(Deserialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum ExceptionType {
    Added = 1,
    Removed = 2,
}

impl From<ExceptionType> for ExceptionKind {
    fn from(value: ExceptionType) -> Self {
        match value {
            ExceptionType::Added => ExceptionKind::Added,
            ExceptionType::Removed => ExceptionKind::Removed,
        }
    }
}

pub type CalendarDateKey = (ServiceId, NaiveDate);

/// Exceptions for the services defined in calendar.txt, or the sole source of
/// service dates when calendar.txt is omitted entirely.
/// Primary key: `(service_id, date)`.
/// See <https://gtfs.org/schedule/reference/#calendar_datestxt>
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDateRow {
    pub service_id: ServiceId,
    #[serde(deserialize_with = "deserialize_yyyymmdd")]
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}

impl WithPrimaryKey<CalendarDateKey> for CalendarDateRow {
    fn primary_key(&self) -> CalendarDateKey {
        (self.service_id.clone(), self.date)
    }
}

impl From<CalendarDateRow> for CalendarException {
    fn from(row: CalendarDateRow) -> Self {
        CalendarException {
            service_id: row.service_id,
            date: row.date,
            kind: row.exception_type.into(),
        }
    }
}
