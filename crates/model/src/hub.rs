use std::collections::HashSet;

use crate::stop::StopId;

/// A named group of stops that share one effective location across modes
/// (§3). Owned by the graph builder, recomputed on every build.
#[derive(Debug, Clone)]
pub struct TransferHub {
    pub hub_name: String,
    pub members: HashSet<StopId>,
}

impl TransferHub {
    pub fn new(hub_name: impl Into<String>) -> Self {
        Self {
            hub_name: hub_name.into(),
            members: HashSet::new(),
        }
    }
}
