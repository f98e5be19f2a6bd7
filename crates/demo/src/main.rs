use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use model::stop::StopId;
use realtime::FeedClient;
use routing::Planner;
use utility::id::Id;

/// Wires a tiny fixture dataset through the whole planner end-to-end: loads
/// C1–C4, runs a best-itinerary query across three modes and a hub
/// transfer, then starts the periodic reload actor (§6, §5).
#[tokio::main]
async fn main() {
    env_logger::init();

    let dataset_root = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "demos/fixture-dataset".to_owned()),
    );

    // no live GTFS-realtime endpoints configured for the fixture dataset
    let feed_client = FeedClient::new(HashMap::new());

    let planner = Arc::new(
        Planner::load(dataset_root, feed_client).expect("could not load fixture dataset"),
    );

    let origin: StopId = Id::new("M1".to_owned());
    let destination: StopId = Id::new("B2".to_owned());
    let departure = NaiveDate::from_ymd_opt(2026, 3, 2)
        .expect("valid fixture date")
        .and_hms_opt(7, 45, 0)
        .expect("valid fixture time");

    match planner.find_best_itinerary(&origin, &destination, Some(departure), None) {
        Ok(itinerary) => {
            log::info!(
                "found itinerary with {} leg(s), {} minute(s)",
                itinerary.legs.len(),
                itinerary.duration_minutes
            );
            for leg in &itinerary.legs {
                log::info!(
                    "  {} -> {} ({}s, transfer={})",
                    leg.from_stop_name,
                    leg.to_stop_name,
                    leg.arrival_time - leg.departure_time,
                    leg.is_transfer
                );
            }
        }
        Err(why) => log::warn!("no itinerary found: {why}"),
    }

    let matches = planner.find_stop_fuzzy("garden squre", 3, 60);
    for (stop, score) in matches {
        log::info!("fuzzy match: {} (score {})", stop.stop_name, score);
    }

    let _reload_actor = scheduler::spawn_periodic_reload(planner.clone(), Duration::from_secs(300));

    tokio::time::sleep(Duration::from_millis(50)).await;
}
