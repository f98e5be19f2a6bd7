use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use model::error::{PlannerError, PlannerResult};
use model::itinerary::Itinerary;
use model::mode::Mode;
use model::stop::{Stop, StopId};
use realtime::{AlertRecord, FeedClient, TripUpdateInfo, VehiclePositionRecord};
use utility::id::Id;

use crate::graph::{PlannerGraph, TRANSFER_TRIP_ID};
use crate::reconstruct::reconstruct;
use crate::scan::{self, BanKey};

const DEFAULT_MAX_TRANSFERS: u32 = 4;

/// The §6 query surface. Owns the single swappable root reference (§5): a
/// reload builds a new [`PlannerGraph`] and publishes it with one write
/// lock acquisition; in-flight queries finish reading the snapshot they
/// already captured.
pub struct Planner {
    graph: RwLock<Arc<PlannerGraph>>,
    feed_client: FeedClient,
    dataset_root: PathBuf,
}

impl Planner {
    pub fn load(dataset_root: PathBuf, feed_client: FeedClient) -> PlannerResult<Self> {
        let graph = PlannerGraph::build(&dataset_root)?;
        Ok(Self {
            graph: RwLock::new(Arc::new(graph)),
            feed_client,
            dataset_root,
        })
    }

    fn snapshot(&self) -> Arc<PlannerGraph> {
        self.graph.read().expect("planner graph lock poisoned").clone()
    }

    /// Rebuilds C1–C4 from `dataset_root` and atomically swaps the root
    /// reference. Concurrent callers are serialized by the write lock
    /// (§6 admin surface: "concurrent reloads are serialized").
    pub fn reload_dataset(&self) -> PlannerResult<()> {
        let graph = PlannerGraph::build(&self.dataset_root)?;
        let mut guard = self.graph.write().expect("planner graph lock poisoned");
        *guard = Arc::new(graph);
        info!("dataset reloaded");
        Ok(())
    }

    fn require_stop(graph: &PlannerGraph, stop_id: &StopId) -> PlannerResult<()> {
        if graph.get_stop(stop_id).is_none() {
            return Err(PlannerError::StopNotFound { stop_id: stop_id.to_string() });
        }
        Ok(())
    }

    pub fn find_best_itinerary(
        &self,
        origin: &StopId,
        destination: &StopId,
        earliest_departure: Option<NaiveDateTime>,
        max_transfers: Option<u32>,
    ) -> PlannerResult<Itinerary> {
        let graph = self.snapshot();
        Self::require_stop(&graph, origin)?;
        Self::require_stop(&graph, destination)?;

        let departure = earliest_departure.unwrap_or_else(|| Local::now().naive_local());
        let max_transfers = max_transfers.unwrap_or(DEFAULT_MAX_TRANSFERS);

        // Two-tier convenience: try a same-mode-only search first (§4.5).
        if let Some(mode) = graph.mode_of(origin) {
            if graph.mode_of(destination) == Some(mode) {
                if let Some(result) =
                    scan::scan(&graph, origin, destination, departure, max_transfers, &HashSet::new(), Some(mode))
                {
                    if let Some(itinerary) = reconstruct(&graph, origin, destination, &result) {
                        return Ok(itinerary);
                    }
                }
            }
        }

        let result = scan::scan(&graph, origin, destination, departure, max_transfers, &HashSet::new(), None)
            .ok_or(PlannerError::NoRouteFound)?;
        reconstruct(&graph, origin, destination, &result).ok_or(PlannerError::NoRouteFound)
    }

    /// k-alternative search by connection banning (§4.5). After each
    /// successful scan, bans the longest leg's `(from, to, trip_id)` triple
    /// before the next attempt, and rejects candidates overlapping a kept
    /// itinerary's stop set by more than 80% (Jaccard).
    pub fn find_k_itineraries(
        &self,
        origin: &StopId,
        destination: &StopId,
        earliest_departure: Option<NaiveDateTime>,
        k: usize,
        max_transfers: Option<u32>,
    ) -> PlannerResult<Vec<Itinerary>> {
        let graph = self.snapshot();
        Self::require_stop(&graph, origin)?;
        Self::require_stop(&graph, destination)?;

        let departure = earliest_departure.unwrap_or_else(|| Local::now().naive_local());
        let max_transfers = max_transfers.unwrap_or(DEFAULT_MAX_TRANSFERS);

        let mut banned: HashSet<BanKey> = HashSet::new();
        let mut kept: Vec<Itinerary> = Vec::new();
        let max_attempts = k.saturating_mul(4).max(8);

        for _ in 0..max_attempts {
            if kept.len() >= k {
                break;
            }
            let Some(result) = scan::scan(&graph, origin, destination, departure, max_transfers, &banned, None)
            else {
                break;
            };
            let Some(candidate) = reconstruct(&graph, origin, destination, &result) else {
                break;
            };

            let Some(ban_key) = longest_leg_ban_key(&candidate) else {
                break;
            };
            banned.insert(ban_key);

            let candidate_stops = candidate.stop_set();
            let overlaps_kept = kept
                .iter()
                .any(|itinerary| jaccard(&candidate_stops, &itinerary.stop_set()) > 0.8);
            if !overlaps_kept {
                kept.push(candidate);
            }
        }

        kept.sort_by_key(|itinerary| itinerary.duration_minutes);
        Ok(kept)
    }

    pub fn find_stop_fuzzy(&self, query: &str, limit: usize, min_score: u8) -> Vec<(Stop, u8)> {
        self.snapshot()
            .stop_index()
            .find_fuzzy(query, limit, min_score)
            .into_iter()
            .map(|(stop, score)| (stop.clone(), score))
            .collect()
    }

    /// Overlays live trip updates onto a copy of `itinerary` (§4.7). Never
    /// fails the caller: a feed error leaves the itinerary unchanged with
    /// `has_realtime_data = false` on every leg (§7.3).
    pub async fn apply_realtime(&self, itinerary: &Itinerary, mode: Mode) -> Itinerary {
        match self.feed_client.fetch_trip_updates(mode).await {
            Ok(updates) => {
                let by_trip: HashMap<String, TripUpdateInfo> = updates
                    .into_iter()
                    .map(|update| (update.trip_id.clone(), update))
                    .collect();
                realtime::apply_trip_updates(itinerary, &by_trip, realtime::DEFAULT_MIN_TRANSFER_SECONDS)
            }
            Err(err) => {
                warn!("realtime overlay unavailable for {mode}: {err}");
                itinerary.clone()
            }
        }
    }

    pub async fn get_vehicle_positions(&self, mode: Mode) -> PlannerResult<Vec<VehiclePositionRecord>> {
        self.feed_client.fetch_vehicle_positions(mode).await
    }

    pub async fn get_alerts(&self, mode: Mode) -> PlannerResult<Vec<AlertRecord>> {
        self.feed_client.fetch_alerts(mode).await
    }

    pub async fn get_alerts_for_route(&self, route_id: &str, mode: Mode) -> PlannerResult<Vec<AlertRecord>> {
        let alerts = self.feed_client.fetch_alerts(mode).await?;
        Ok(alerts
            .into_iter()
            .filter(|alert| alert.informed_routes.iter().any(|r| r == route_id))
            .collect())
    }

    pub async fn get_alerts_for_stop(&self, stop_id: &StopId, mode: Mode) -> PlannerResult<Vec<AlertRecord>> {
        let raw = stop_id.to_string();
        let alerts = self.feed_client.fetch_alerts(mode).await?;
        Ok(alerts
            .into_iter()
            .filter(|alert| alert.informed_stops.iter().any(|s| s == &raw))
            .collect())
    }
}

fn longest_leg_ban_key(itinerary: &Itinerary) -> Option<BanKey> {
    let leg = itinerary
        .legs
        .iter()
        .max_by_key(|leg| leg.arrival_time - leg.departure_time)?;
    let trip_id = leg
        .trip_id
        .clone()
        .unwrap_or_else(|| Id::new(TRANSFER_TRIP_ID.to_owned()));
    Some((leg.from_stop_id.clone(), leg.to_stop_id.clone(), trip_id))
}

fn jaccard(a: &HashSet<StopId>, b: &HashSet<StopId>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture_planner() -> Planner {
        let dataset_root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../demos/fixture-dataset");
        Planner::load(dataset_root, FeedClient::new(HashMap::new())).expect("fixture dataset loads")
    }

    #[test]
    fn crosses_two_hub_transfers_with_correct_clock_times() {
        let planner = fixture_planner();
        let origin: StopId = Id::new("M1".to_owned());
        let destination: StopId = Id::new("B2".to_owned());
        let departure = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap();

        let itinerary = planner
            .find_best_itinerary(&origin, &destination, Some(departure), None)
            .expect("a journey crossing both hubs exists");

        assert!(itinerary.legs.iter().any(|leg| leg.is_transfer));
        // A transfer's reported times must reflect when it was actually
        // walked, not the connection's fixed "available any time" storage.
        for leg in &itinerary.legs {
            assert!(leg.arrival_time >= leg.departure_time);
        }
        assert!(itinerary.arrival_time > itinerary.departure_time);
    }

    #[test]
    fn unknown_stop_is_rejected() {
        let planner = fixture_planner();
        let origin: StopId = Id::new("does-not-exist".to_owned());
        let destination: StopId = Id::new("B2".to_owned());
        let err = planner
            .find_best_itinerary(&origin, &destination, None, None)
            .unwrap_err();
        assert!(matches!(err, PlannerError::StopNotFound { .. }));
    }
}
