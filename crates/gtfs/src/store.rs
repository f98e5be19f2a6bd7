use std::collections::HashMap;
use std::path::Path;

use log::info;
use model::calendar::{CalendarException, CalendarWindow, ServiceCalendar, ServiceId};
use model::error::{PlannerError, PlannerResult};
use model::mode::Mode;
use model::route::{Route, RouteId, RouteType as ModelRouteType};
use model::stop::{Stop, StopId};
use model::trip::{StopVisit, Trip, TripId};
use utility::id::Id;

use crate::data_model::calendar::CalendarRow;
use crate::data_model::calendar_dates::CalendarDateRow;
use crate::data_model::routes::{RouteId as GtfsRouteId, RouteRow, RouteType as GtfsRouteType};
use crate::data_model::stop_times::{StopTimeKey, StopTimeRow};
use crate::data_model::stops::{StopId as GtfsStopId, StopRow};
use crate::data_model::transfers::TransferRow;
use crate::data_model::trips::{TripId as GtfsTripId, TripRow};
use crate::database::{read_csv_file, InMemoryPrimaryKeyTable};

const REQUIRED_FILES: &[&str] = &["stops.txt", "routes.txt", "trips.txt", "stop_times.txt"];

fn convert_route_type(value: GtfsRouteType) -> ModelRouteType {
    match value {
        GtfsRouteType::TramStreetcarOrLightRail => ModelRouteType::TramStreetcarLightRail,
        GtfsRouteType::SubwayOrMetro => ModelRouteType::SubwayMetro,
        GtfsRouteType::Rail => ModelRouteType::Rail,
        GtfsRouteType::Bus => ModelRouteType::Bus,
        GtfsRouteType::Ferry => ModelRouteType::Ferry,
        other => ModelRouteType::Other(other as u16),
    }
}

fn incomplete(mode: Mode, file_name: &str, error: impl std::fmt::Display) -> PlannerError {
    PlannerError::DatasetIncomplete {
        mode,
        file: format!("{file_name} ({error})"),
    }
}

/// One mode's static schedule, loaded once at startup and again on every
/// reload (§4.1). Stops, routes and trips are immutable once loaded; a
/// reload replaces the whole store rather than mutating it in place.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    mode: Mode,
    stops: HashMap<StopId, Stop>,
    routes: HashMap<RouteId, Route>,
    trips: HashMap<TripId, Trip>,
    stop_times: HashMap<TripId, Vec<StopVisit>>,
    calendar: ServiceCalendar,
}

impl ScheduleStore {
    pub fn load(dir: &Path, mode: Mode) -> PlannerResult<Self> {
        for file_name in REQUIRED_FILES {
            if !dir.join(file_name).exists() {
                return Err(PlannerError::DatasetIncomplete {
                    mode,
                    file: (*file_name).to_owned(),
                });
            }
        }

        let mut stop_rows: InMemoryPrimaryKeyTable<GtfsStopId, StopRow> = InMemoryPrimaryKeyTable::new();
        read_csv_file(&mut stop_rows, &dir.join("stops.txt"))
            .map_err(|e| incomplete(mode, "stops.txt", e))?;

        let mut route_rows: InMemoryPrimaryKeyTable<GtfsRouteId, RouteRow> = InMemoryPrimaryKeyTable::new();
        read_csv_file(&mut route_rows, &dir.join("routes.txt"))
            .map_err(|e| incomplete(mode, "routes.txt", e))?;

        let mut trip_rows: InMemoryPrimaryKeyTable<GtfsTripId, TripRow> = InMemoryPrimaryKeyTable::new();
        read_csv_file(&mut trip_rows, &dir.join("trips.txt"))
            .map_err(|e| incomplete(mode, "trips.txt", e))?;

        let mut stop_time_rows: InMemoryPrimaryKeyTable<StopTimeKey, StopTimeRow> =
            InMemoryPrimaryKeyTable::new();
        read_csv_file(&mut stop_time_rows, &dir.join("stop_times.txt"))
            .map_err(|e| incomplete(mode, "stop_times.txt", e))?;

        let mut calendar_rows: InMemoryPrimaryKeyTable<ServiceId, CalendarRow> =
            InMemoryPrimaryKeyTable::new();
        let calendar_present = read_csv_file(&mut calendar_rows, &dir.join("calendar.txt"))
            .map_err(|e| incomplete(mode, "calendar.txt", e))?
            .is_some();

        let mut calendar_date_rows: InMemoryPrimaryKeyTable<
            crate::data_model::calendar_dates::CalendarDateKey,
            CalendarDateRow,
        > = InMemoryPrimaryKeyTable::new();
        let calendar_dates_present =
            read_csv_file(&mut calendar_date_rows, &dir.join("calendar_dates.txt"))
                .map_err(|e| incomplete(mode, "calendar_dates.txt", e))?
                .is_some();

        if !calendar_present && !calendar_dates_present {
            return Err(PlannerError::DatasetIncomplete {
                mode,
                file: "calendar.txt or calendar_dates.txt".to_owned(),
            });
        }

        // Loaded for completeness but not consumed: transfers are synthesized
        // from hub proximity by the graph builder (§4.4).
        let mut transfer_rows: InMemoryPrimaryKeyTable<
            crate::data_model::transfers::TransferKey,
            TransferRow,
        > = InMemoryPrimaryKeyTable::new();
        let skipped_transfers = read_csv_file(&mut transfer_rows, &dir.join("transfers.txt"))
            .map_err(|e| incomplete(mode, "transfers.txt", e))?;
        if let Some(skipped) = skipped_transfers {
            info!("{mode}: loaded transfers.txt ({skipped} rows skipped)");
        }

        use crate::database::PrimaryKeyTable;

        let stops: HashMap<StopId, Stop> = stop_rows
            .get_all()
            .into_iter()
            .map(|row| {
                let id: StopId = Id::new(row.stop_id.raw());
                (
                    id.clone(),
                    Stop {
                        id,
                        stop_name: row.stop_name.clone(),
                        lat: row.lat,
                        lon: row.lon,
                        platform_code: row.platform_code.clone(),
                        location_type: row.location_type.map(|t| t as u8),
                    },
                )
            })
            .collect();

        let routes: HashMap<RouteId, Route> = route_rows
            .get_all()
            .into_iter()
            .map(|row| {
                let id: RouteId = Id::new(row.route_id.raw());
                (
                    id.clone(),
                    Route {
                        id,
                        route_long_name: row.route_long_name.clone(),
                        route_short_name: row.route_short_name.clone(),
                        route_type: convert_route_type(row.route_type),
                    },
                )
            })
            .collect();

        let trips: HashMap<TripId, Trip> = trip_rows
            .get_all()
            .into_iter()
            .map(|row| {
                let id: TripId = Id::new(row.trip_id.raw());
                (
                    id.clone(),
                    Trip {
                        id,
                        route_id: Id::new(row.route_id.raw()),
                        service_id: Id::new(row.service_id.clone()),
                        trip_headsign: row.trip_headsign.clone(),
                    },
                )
            })
            .collect();

        let mut stop_times: HashMap<TripId, Vec<StopVisit>> = HashMap::new();
        for row in stop_time_rows.get_all() {
            let trip_id: TripId = Id::new(row.trip_id.raw());
            stop_times.entry(trip_id.clone()).or_default().push(StopVisit {
                trip_id,
                stop_id: Id::new(row.stop_id.raw()),
                arrival_time: row.arrival_time,
                departure_time: row.departure_time,
                stop_sequence: row.stop_sequence,
            });
        }
        for visits in stop_times.values_mut() {
            visits.sort_by_key(|v| v.stop_sequence);
        }

        let windows: Vec<CalendarWindow> = calendar_rows
            .get_all()
            .into_iter()
            .cloned()
            .map(CalendarWindow::from)
            .collect();
        let exceptions: Vec<CalendarException> = calendar_date_rows
            .get_all()
            .into_iter()
            .cloned()
            .map(CalendarException::from)
            .collect();
        let calendar = ServiceCalendar::new(windows, exceptions);

        info!(
            "{mode}: loaded {} stops, {} routes, {} trips, {} trip schedules",
            stops.len(),
            routes.len(),
            trips.len(),
            stop_times.len()
        );

        Ok(Self {
            mode,
            stops,
            routes,
            trips,
            stop_times,
            calendar,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn get_stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn get_route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn get_trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.get(id)
    }

    pub fn get_trip_stop_times(&self, id: &TripId) -> &[StopVisit] {
        self.stop_times.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    pub fn trip_schedules(&self) -> impl Iterator<Item = (&TripId, &Vec<StopVisit>)> {
        self.stop_times.iter()
    }

    pub fn calendar(&self) -> &ServiceCalendar {
        &self.calendar
    }
}
