use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the transport modes this planner composes into a single graph.
///
/// Each mode is backed by its own tabular feed directory (C1) but shares the
/// same row schema; this enum exists purely to tag which directory a stop,
/// route or connection came from (§3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    RegionalRail,
    Metro,
    Tram,
    Bus,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::RegionalRail => "regional_rail",
            Mode::Metro => "metro",
            Mode::Tram => "tram",
            Mode::Bus => "bus",
        }
    }

    pub fn all() -> [Mode; 4] {
        [Mode::RegionalRail, Mode::Metro, Mode::Tram, Mode::Bus]
    }

    /// Only these modes serve service alerts over the realtime feeds (§4.7, §6).
    pub fn serves_alerts(&self) -> bool {
        matches!(self, Mode::Metro | Mode::Tram)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
