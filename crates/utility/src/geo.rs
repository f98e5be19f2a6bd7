pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default proximity threshold, in metres, used by hub discovery to decide
/// whether two stops of different modes represent the same interchange.
pub const DEFAULT_PROXIMITY_THRESHOLD_M: f64 = 100.0;

/// Assumed walking speed, metres per second (4.5 km/h).
const WALKING_SPEED_MPS: f64 = 4.5 * 1000.0 / 3600.0;

/// Fixed buffer added to every synthesized transfer for hub navigation.
const HUB_NAVIGATION_BUFFER_SECONDS: i64 = 120;

const MIN_TRANSFER_SECONDS: i64 = 180;
const MAX_TRANSFER_SECONDS: i64 = 900;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> ((f64, f64), (f64, f64)) {
    // Convert latitude and longitude from degrees to radians
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_km / EARTH_RADIUS_KM;
    let max_lat = lat_rad + radius_km / EARTH_RADIUS_KM;

    // Longitude bounds (adjusted by latitude)
    let min_lon = lon_rad - radius_km / (EARTH_RADIUS_KM * lat_rad.cos());
    let max_lon = lon_rad + radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    // Convert bounds back to degrees
    let min_lat_deg = to_degrees(min_lat);
    let max_lat_deg = to_degrees(max_lat);
    let min_lon_deg = to_degrees(min_lon);
    let max_lon_deg = to_degrees(max_lon);

    ((min_lat_deg, min_lon_deg), (max_lat_deg, max_lon_deg))
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in metres.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = to_radians(lat1);
    let lon1_rad = to_radians(lon1);
    let lat2_rad = to_radians(lat2);
    let lon2_rad = to_radians(lon2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether two stops are close enough to belong to the same transfer hub.
pub fn are_stops_nearby(lat1: f64, lon1: f64, lat2: f64, lon2: f64, threshold_m: f64) -> bool {
    haversine_m(lat1, lon1, lat2, lon2) <= threshold_m
}

/// Walking time for a synthesized transfer, clamped to [180, 900] seconds:
/// 4.5 km/h walking speed plus a 2-minute hub-navigation buffer.
pub fn walking_time_seconds(distance_m: f64) -> i64 {
    let walk_seconds = (distance_m / WALKING_SPEED_MPS).ceil() as i64;
    // rounded to whole minutes of walking time rather than raw seconds
    let minutes = (distance_m / 75.0).ceil() as i64;
    let total = minutes * 60 + HUB_NAVIGATION_BUFFER_SECONDS;
    debug_assert!(walk_seconds >= 0);
    total.clamp(MIN_TRANSFER_SECONDS, MAX_TRANSFER_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_m_is_zero_for_identical_points() {
        assert_eq!(haversine_m(50.0, 10.0, 50.0, 10.0), 0.0);
    }

    #[test]
    fn walking_time_is_clamped() {
        assert_eq!(walking_time_seconds(0.0), MIN_TRANSFER_SECONDS);
        assert_eq!(walking_time_seconds(100_000.0), MAX_TRANSFER_SECONDS);
    }

    #[test]
    fn nearby_threshold_is_inclusive() {
        // roughly 90m apart along a meridian
        assert!(are_stops_nearby(50.0, 10.0, 50.00081, 10.0, 100.0));
        assert!(!are_stops_nearby(50.0, 10.0, 50.01, 10.0, 100.0));
    }
}
