pub mod aggregator;
pub mod graph;
pub mod planner;
pub mod reconstruct;
pub mod scan;
pub mod stop_index;

pub use aggregator::Aggregator;
pub use graph::{GraphBuilder, PlannerGraph};
pub use planner::Planner;
pub use stop_index::StopIndex;
