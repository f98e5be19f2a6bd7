use std::collections::HashMap;

use model::stop::StopId;
use utility::id::Id;

use crate::pb::transit_realtime;
use crate::types::{AlertRecord, StopTimeDelta, TimeRange, TripUpdateInfo, VehiclePositionRecord};

fn cause_name(cause: i32) -> String {
    match cause {
        1 => "unknown_cause",
        2 => "other_cause",
        3 => "technical_problem",
        4 => "strike",
        5 => "demonstration",
        6 => "accident",
        7 => "holiday",
        8 => "weather",
        9 => "maintenance",
        10 => "construction",
        11 => "police_activity",
        12 => "medical_emergency",
        _ => "unknown_cause",
    }
    .to_owned()
}

fn effect_name(effect: i32) -> String {
    match effect {
        1 => "no_service",
        2 => "reduced_service",
        3 => "significant_delays",
        4 => "detour",
        5 => "additional_service",
        6 => "modified_service",
        7 => "other_effect",
        9 => "stop_moved",
        10 => "no_effect",
        _ => "unknown_effect",
    }
    .to_owned()
}

fn severity_name(severity: i32) -> String {
    match severity {
        2 => "info",
        3 => "warning",
        4 => "severe",
        _ => "unknown_severity",
    }
    .to_owned()
}

fn occupancy_name(status: i32) -> String {
    match status {
        0 => "empty",
        1 => "many_seats_available",
        2 => "few_seats_available",
        3 => "standing_room_only",
        4 => "crushed_standing_room_only",
        5 => "full",
        6 => "not_accepting_passengers",
        _ => "unknown",
    }
    .to_owned()
}

/// `ScheduleRelationship::CANCELED` for `TripDescriptor` (§4.7 step 1-2).
const TRIP_SCHEDULE_RELATIONSHIP_CANCELED: i32 = 3;

pub fn decode_trip_updates(message: &transit_realtime::FeedMessage) -> Vec<TripUpdateInfo> {
    message
        .entity
        .iter()
        .filter_map(|entity| entity.trip_update.as_ref())
        .map(|trip_update| {
            let trip_id = trip_update
                .trip
                .trip_id
                .clone()
                .unwrap_or_default();
            let is_cancelled = trip_update.trip.schedule_relationship
                == Some(TRIP_SCHEDULE_RELATIONSHIP_CANCELED);

            let mut stops: HashMap<StopId, StopTimeDelta> = HashMap::new();
            for stop_time_update in &trip_update.stop_time_update {
                let Some(stop_id) = stop_time_update.stop_id.clone() else {
                    continue;
                };
                stops.insert(
                    Id::new(stop_id),
                    StopTimeDelta {
                        departure_delay_seconds: stop_time_update
                            .departure
                            .as_ref()
                            .and_then(|event| event.delay),
                        arrival_delay_seconds: stop_time_update
                            .arrival
                            .as_ref()
                            .and_then(|event| event.delay),
                        platform: stop_time_update.platform.clone(),
                    },
                );
            }

            TripUpdateInfo {
                trip_id,
                is_cancelled,
                stops,
            }
        })
        .collect()
}

pub fn decode_vehicle_positions(
    message: &transit_realtime::FeedMessage,
) -> Vec<VehiclePositionRecord> {
    message
        .entity
        .iter()
        .filter_map(|entity| entity.vehicle.as_ref())
        .filter_map(|vehicle| {
            let position = vehicle.position.as_ref()?;
            Some(VehiclePositionRecord {
                trip_id: vehicle.trip.as_ref().and_then(|t| t.trip_id.clone()),
                route_id: vehicle.trip.as_ref().and_then(|t| t.route_id.clone()),
                stop_id: vehicle.stop_id.clone().map(Id::new),
                current_stop_sequence: vehicle.current_stop_sequence,
                lat: position.latitude,
                lon: position.longitude,
                bearing: position.bearing,
                speed: position.speed,
                occupancy_status: vehicle.occupancy_status.map(occupancy_name),
            })
        })
        .collect()
}

pub fn decode_alerts(message: &transit_realtime::FeedMessage) -> Vec<AlertRecord> {
    message
        .entity
        .iter()
        .filter_map(|entity| entity.alert.as_ref())
        .map(|alert| AlertRecord {
            cause: cause_name(alert.cause.unwrap_or(1)),
            effect: effect_name(alert.effect.unwrap_or(8)),
            severity: severity_name(alert.severity_level.unwrap_or(1)),
            header_text: alert
                .header_text
                .as_ref()
                .and_then(|t| t.translation.first())
                .map(|t| t.text.clone()),
            description_text: alert
                .description_text
                .as_ref()
                .and_then(|t| t.translation.first())
                .map(|t| t.text.clone()),
            active_periods: alert
                .active_period
                .iter()
                .map(|range| TimeRange {
                    start: range.start,
                    end: range.end,
                })
                .collect(),
            informed_routes: alert
                .informed_entity
                .iter()
                .filter_map(|e| e.route_id.clone())
                .collect(),
            informed_stops: alert
                .informed_entity
                .iter()
                .filter_map(|e| e.stop_id.clone())
                .collect(),
        })
        .collect()
}
