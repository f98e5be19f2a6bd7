mod client;
mod decode;
mod overlay;
mod pb;
mod types;

pub use client::FeedClient;
pub use overlay::{apply_trip_updates, DEFAULT_MIN_TRANSFER_SECONDS};
pub use types::{AlertRecord, StopTimeDelta, TimeRange, TripUpdateInfo, VehiclePositionRecord};

/// Which of the three GTFS-realtime feed kinds a fetch/cache/rate-limit
/// entry belongs to (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    TripUpdates,
    VehiclePositions,
    Alerts,
}

impl FeedKind {
    pub fn all() -> [FeedKind; 3] {
        [FeedKind::TripUpdates, FeedKind::VehiclePositions, FeedKind::Alerts]
    }
}
