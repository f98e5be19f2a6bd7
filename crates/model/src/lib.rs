pub mod calendar;
pub mod connection;
pub mod error;
pub mod hub;
pub mod itinerary;
pub mod mode;
pub mod route;
pub mod stop;
pub mod trip;

pub use calendar::{CalendarException, CalendarWindow, ExceptionKind, ServiceCalendar, ServiceId};
pub use connection::{Connection, ConnectionIndex};
pub use error::{PlannerError, PlannerResult};
pub use hub::TransferHub;
pub use itinerary::{IntermediateStop, Itinerary, Leg};
pub use mode::Mode;
pub use route::{Route, RouteId, RouteType};
pub use stop::{Stop, StopId};
pub use trip::{StopVisit, Trip, TripId};
