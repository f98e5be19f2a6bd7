use std::collections::HashMap;
use std::path::Path;

use gtfs::ScheduleStore;
use model::error::PlannerResult;
use model::mode::Mode;
use model::route::{Route, RouteId};
use model::stop::{Stop, StopId};
use model::trip::{StopVisit, Trip, TripId};

/// Composes one [`ScheduleStore`] per mode into a single merged view (§4.2).
/// Trips keep their originating mode; no semantic merging happens beyond the
/// stop map, where a later store wins on a colliding `stop_id`.
pub struct Aggregator {
    stores: HashMap<Mode, ScheduleStore>,
    mode_of_stop: HashMap<StopId, Mode>,
    stops: HashMap<StopId, Stop>,
}

impl Aggregator {
    /// Loads one store per mode from `dataset_root/<mode>/`, in `Mode::all()`
    /// order so the "later store wins" collision rule is deterministic.
    pub fn load(dataset_root: &Path) -> PlannerResult<Self> {
        let mut stores = HashMap::new();
        for mode in Mode::all() {
            let store = ScheduleStore::load(&dataset_root.join(mode.as_str()), mode)?;
            stores.insert(mode, store);
        }
        Ok(Self::from_stores(stores))
    }

    pub fn from_stores(stores: HashMap<Mode, ScheduleStore>) -> Self {
        let mut mode_of_stop = HashMap::new();
        let mut stops = HashMap::new();

        for mode in Mode::all() {
            let Some(store) = stores.get(&mode) else {
                continue;
            };
            for stop in store.stops() {
                mode_of_stop.insert(stop.id.clone(), mode);
                stops.insert(stop.id.clone(), stop.clone());
            }
        }

        Self {
            stores,
            mode_of_stop,
            stops,
        }
    }

    pub fn mode_of(&self, stop_id: &StopId) -> Option<Mode> {
        self.mode_of_stop.get(stop_id).copied()
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn get_stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn get_route(&self, route_id: &RouteId, mode: Mode) -> Option<&Route> {
        self.stores.get(&mode)?.get_route(route_id)
    }

    pub fn get_trip(&self, trip_id: &TripId, mode: Mode) -> Option<&Trip> {
        self.stores.get(&mode)?.get_trip(trip_id)
    }

    pub fn get_trip_stop_times(&self, trip_id: &TripId, mode: Mode) -> &[StopVisit] {
        self.stores
            .get(&mode)
            .map(|store| store.get_trip_stop_times(trip_id))
            .unwrap_or(&[])
    }

    pub fn store(&self, mode: Mode) -> Option<&ScheduleStore> {
        self.stores.get(&mode)
    }

    pub fn stores(&self) -> impl Iterator<Item = (&Mode, &ScheduleStore)> {
        self.stores.iter()
    }
}
