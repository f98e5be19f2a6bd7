pub mod calendar;
pub mod calendar_dates;
pub mod routes;
pub mod stop_times;
pub mod stops;
pub mod transfers;
pub mod trips;

/// An internal ID, not intended to be shown to riders: a sequence of any
/// UTF-8 characters, recommended to be printable ASCII.
/// See <https://gtfs.org/schedule/reference/#field-types>.
pub type IdString = String;

/// WGS84 latitude in decimal degrees, in `[-90.0, 90.0]`.
pub type Latitude = f64;

/// WGS84 longitude in decimal degrees, in `[-180.0, 180.0]`.
pub type Longitude = f64;

/// Time in `HH:MM:SS` (`H:MM:SS` also accepted), measured from midnight of
/// the service day. Values `>= 24:00:00` denote after-midnight operation of
/// the same service day.
pub type Time = String;

/// Service day in `YYYYMMDD` format.
pub type Date = String;
