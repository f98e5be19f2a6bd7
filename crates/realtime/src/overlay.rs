use std::collections::HashMap;

use model::itinerary::Itinerary;

use crate::types::TripUpdateInfo;

/// Minimum seconds between one leg's actual arrival and the next leg's
/// actual departure for the transfer to remain valid once realtime delays
/// are applied (§4.7 step 3).
pub const DEFAULT_MIN_TRANSFER_SECONDS: i64 = 120;

/// Overlays trip-update delays onto a copy of `itinerary` (§4.7). Never
/// mutates the input; a missing or unavailable feed simply means no leg
/// gets `has_realtime_data = true`, it does not fail the call.
pub fn apply_trip_updates(
    itinerary: &Itinerary,
    trip_updates: &HashMap<String, TripUpdateInfo>,
    min_transfer_seconds: i64,
) -> Itinerary {
    let mut overlay = itinerary.clone();

    for leg in &mut overlay.legs {
        let Some(trip_id) = leg.trip_id.as_ref() else {
            continue;
        };
        let Some(update) = trip_updates.get(&trip_id.raw()) else {
            continue;
        };

        if update.is_cancelled {
            leg.is_cancelled = true;
        }

        leg.scheduled_departure = Some(leg.departure_time);
        leg.scheduled_arrival = Some(leg.arrival_time);

        let from_delta = update.stops.get(&leg.from_stop_id);
        let to_delta = update.stops.get(&leg.to_stop_id);

        let departure_delay = from_delta.and_then(|d| d.departure_delay_seconds).unwrap_or(0);
        let arrival_delay = to_delta.and_then(|d| d.arrival_delay_seconds).unwrap_or(0);

        leg.actual_departure = Some(leg.departure_time + departure_delay as i64);
        leg.actual_arrival = Some(leg.arrival_time + arrival_delay as i64);
        leg.platform = to_delta
            .and_then(|d| d.platform.clone())
            .or_else(|| from_delta.and_then(|d| d.platform.clone()));
        leg.has_realtime_data = true;
    }

    revalidate_transfers(&mut overlay, min_transfer_seconds);
    overlay
}

fn revalidate_transfers(itinerary: &mut Itinerary, min_transfer_seconds: i64) {
    if itinerary.legs.iter().any(|leg| leg.is_cancelled) {
        itinerary.is_valid = false;
        itinerary.validity_message = Some("a leg in this itinerary has been cancelled".to_owned());
        return;
    }

    for window in itinerary.legs.windows(2) {
        let (current, next) = (&window[0], &window[1]);
        if current.is_transfer || next.is_transfer {
            continue;
        }
        let available = next.effective_departure() - current.effective_arrival();
        if available < min_transfer_seconds {
            itinerary.is_valid = false;
            itinerary.validity_message = Some(format!(
                "transfer at {} no longer fits after realtime delays",
                current.to_stop_name
            ));
            return;
        }
    }
}
