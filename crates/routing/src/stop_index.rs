use model::stop::{normalize_stop_name, Stop};
use utility::edit_distance::edit_distance;

use crate::aggregator::Aggregator;

/// Name lookup over the aggregator's merged stop view (§4.3). Built once
/// from a snapshot of stops; a reload rebuilds it alongside the graph.
pub struct StopIndex {
    stops: Vec<Stop>,
}

impl StopIndex {
    pub fn build(aggregator: &Aggregator) -> Self {
        let mut stops: Vec<Stop> = aggregator.stops().cloned().collect();
        stops.sort_by(|a, b| {
            a.stop_name
                .cmp(&b.stop_name)
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });
        Self { stops }
    }

    /// All stops whose normalized name exactly matches `name`'s, ordered by
    /// `stop_name` for determinism.
    pub fn find_exact(&self, name: &str) -> Vec<&Stop> {
        let target = normalize_stop_name(name);
        self.stops
            .iter()
            .filter(|stop| stop.normalized_name() == target)
            .collect()
    }

    /// Deterministic token-similarity score in `0..=100`: exact (normalized)
    /// matches score 100, results ordered by descending score then
    /// `stop_name` lexical order (§4.3).
    pub fn find_fuzzy(&self, query: &str, limit: usize, min_score: u8) -> Vec<(&Stop, u8)> {
        let target = normalize_stop_name(query);

        let mut scored: Vec<(&Stop, u8)> = self
            .stops
            .iter()
            .map(|stop| (stop, similarity_score(&target, &stop.normalized_name())))
            .filter(|(_, score)| *score >= min_score)
            .collect();

        scored.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.stop_name.cmp(&b.0.stop_name))
        });
        scored.truncate(limit);
        scored
    }
}

/// `100` at zero edit distance, decaying linearly with distance relative to
/// the longer of the two normalized names.
fn similarity_score(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    let distance = edit_distance(a, b);
    let longest = a.chars().count().max(b.chars().count()).max(1);
    let ratio = 1.0 - (distance as f64 / longest as f64);
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_normalized_match_scores_100() {
        assert_eq!(similarity_score("flinders street", "flinders street"), 100);
    }

    #[test]
    fn near_miss_scores_below_100_but_above_zero() {
        let score = similarity_score("flinders street", "flinders stret");
        assert!(score > 50 && score < 100);
    }
}
