use std::collections::HashMap;
use std::time::Duration;

use cache::{RateLimiter, TtlCache};
use model::error::{PlannerError, PlannerResult};
use model::mode::Mode;
use prost::Message;

use crate::pb::transit_realtime::FeedMessage;
use crate::types::{AlertRecord, TripUpdateInfo, VehiclePositionRecord};
use crate::{decode, FeedKind};

const FEED_TTL: Duration = Duration::from_secs(30);
const FEED_CACHE_CAPACITY: usize = 64;
const FEED_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(30);
const MAX_CALLS_PER_WINDOW: usize = 24;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Fetches, decodes and caches the three GTFS-realtime feed kinds, rate
/// limited per `(mode, feed_kind)` at ≤ 24 calls / 60 s (§4.7).
pub struct FeedClient {
    http: reqwest::Client,
    endpoints: HashMap<(Mode, FeedKind), String>,
    cache: TtlCache<(Mode, FeedKind), FeedMessage>,
    rate_limiters: HashMap<(Mode, FeedKind), RateLimiter>,
}

impl FeedClient {
    pub fn new(endpoints: HashMap<(Mode, FeedKind), String>) -> Self {
        let mut rate_limiters = HashMap::new();
        for mode in Mode::all() {
            for kind in FeedKind::all() {
                rate_limiters.insert(
                    (mode, kind),
                    RateLimiter::new(MAX_CALLS_PER_WINDOW, RATE_LIMIT_WINDOW),
                );
            }
        }
        Self {
            http: reqwest::Client::new(),
            endpoints,
            cache: TtlCache::new(FEED_CACHE_CAPACITY, FEED_TTL, FEED_CACHE_SWEEP_INTERVAL),
            rate_limiters,
        }
    }

    pub fn disabled_cache_and_limits(endpoints: HashMap<(Mode, FeedKind), String>) -> Self {
        let mut rate_limiters = HashMap::new();
        for mode in Mode::all() {
            for kind in FeedKind::all() {
                rate_limiters.insert((mode, kind), RateLimiter::disabled());
            }
        }
        Self {
            http: reqwest::Client::new(),
            endpoints,
            cache: TtlCache::disabled(),
            rate_limiters,
        }
    }

    async fn fetch_feed(&self, mode: Mode, kind: FeedKind) -> PlannerResult<FeedMessage> {
        if let Some(cached) = self.cache.get(&(mode, kind)) {
            return Ok(cached);
        }

        let url = self
            .endpoints
            .get(&(mode, kind))
            .ok_or_else(|| PlannerError::RealtimeUnavailable {
                mode,
                reason: format!("no {kind:?} endpoint configured"),
            })?;

        if let Some(limiter) = self.rate_limiters.get(&(mode, kind)) {
            limiter.acquire().await;
        }

        let bytes = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PlannerError::TransportError { reason: e.to_string() })?
            .error_for_status()
            .map_err(|e| PlannerError::TransportError { reason: e.to_string() })?
            .bytes()
            .await
            .map_err(|e| PlannerError::TransportError { reason: e.to_string() })?;

        let message = FeedMessage::decode(bytes).map_err(|e| PlannerError::TransportError {
            reason: format!("malformed {kind:?} feed: {e}"),
        })?;

        self.cache.insert((mode, kind), message.clone());
        Ok(message)
    }

    pub async fn fetch_trip_updates(&self, mode: Mode) -> PlannerResult<Vec<TripUpdateInfo>> {
        let message = self.fetch_feed(mode, FeedKind::TripUpdates).await?;
        Ok(decode::decode_trip_updates(&message))
    }

    pub async fn fetch_vehicle_positions(
        &self,
        mode: Mode,
    ) -> PlannerResult<Vec<VehiclePositionRecord>> {
        let message = self.fetch_feed(mode, FeedKind::VehiclePositions).await?;
        Ok(decode::decode_vehicle_positions(&message))
    }

    /// Only `metro` and `tram` serve alerts (§4.7, §6, §8 scenario 5);
    /// any other mode returns an empty list without attempting a fetch.
    pub async fn fetch_alerts(&self, mode: Mode) -> PlannerResult<Vec<AlertRecord>> {
        if !mode.serves_alerts() {
            return Ok(Vec::new());
        }
        let message = self.fetch_feed(mode, FeedKind::Alerts).await?;
        Ok(decode::decode_alerts(&message))
    }
}
