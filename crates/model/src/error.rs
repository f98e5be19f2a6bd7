use std::error::Error as StdError;
use std::fmt;

use crate::mode::Mode;

/// The error taxonomy surfaced at the boundary (§6/§7).
///
/// Structural/input errors (`StopNotFound`, `Cancelled`) are surfaced
/// verbatim and never retried. `DatasetIncomplete` is a load-time failure.
/// `RealtimeUnavailable`/`RateLimited`/`TransportError` are transient
/// live-feed failures, captured locally by C7 — a failed realtime overlay
/// never fails the underlying journey query (§7.3).
#[derive(Debug)]
pub enum PlannerError {
    StopNotFound { stop_id: String },
    NoRouteFound,
    DatasetIncomplete { mode: Mode, file: String },
    RealtimeUnavailable { mode: Mode, reason: String },
    RateLimited { feed: String },
    TransportError { reason: String },
    Cancelled,
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::StopNotFound { stop_id } => write!(f, "stop not found: {stop_id}"),
            PlannerError::NoRouteFound => write!(f, "no route found"),
            PlannerError::DatasetIncomplete { mode, file } => {
                write!(f, "dataset for mode {mode} is missing required file {file}")
            }
            PlannerError::RealtimeUnavailable { mode, reason } => {
                write!(f, "realtime data unavailable for mode {mode}: {reason}")
            }
            PlannerError::RateLimited { feed } => write!(f, "rate limited: {feed}"),
            PlannerError::TransportError { reason } => write!(f, "transport error: {reason}"),
            PlannerError::Cancelled => write!(f, "query cancelled"),
            PlannerError::Other(why) => write!(f, "{why}"),
        }
    }
}

impl StdError for PlannerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            PlannerError::Other(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
