use std::collections::HashMap;

use model::stop::StopId;

/// Per-stop delay/platform info carried by a trip update (§4.7 step 1).
#[derive(Debug, Clone, Default)]
pub struct StopTimeDelta {
    pub departure_delay_seconds: Option<i32>,
    pub arrival_delay_seconds: Option<i32>,
    pub platform: Option<String>,
}

/// One trip's realtime state, keyed by `stop_id` for the legs it touches.
#[derive(Debug, Clone, Default)]
pub struct TripUpdateInfo {
    pub trip_id: String,
    pub is_cancelled: bool,
    pub stops: HashMap<StopId, StopTimeDelta>,
}

#[derive(Debug, Clone)]
pub struct VehiclePositionRecord {
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
    pub stop_id: Option<StopId>,
    pub current_stop_sequence: Option<u32>,
    pub lat: f32,
    pub lon: f32,
    pub bearing: Option<f32>,
    pub speed: Option<f32>,
    pub occupancy_status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TimeRange {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlertRecord {
    pub cause: String,
    pub effect: String,
    pub severity: String,
    pub header_text: Option<String>,
    pub description_text: Option<String>,
    pub active_periods: Vec<TimeRange>,
    pub informed_routes: Vec<String>,
    pub informed_stops: Vec<String>,
}
