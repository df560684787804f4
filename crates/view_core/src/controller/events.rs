//! Transition outcomes, lifecycle phase and diagnostic counters.

use serde::Serialize;
use shared::{domain::RouteKey, error::NavError};

/// Result of handling one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Target equals the current route; nothing happened.
    Ignored,
    Applied(RouteKey),
    /// Content could not be fetched. The route still advanced; the previous
    /// content stays on screen.
    Failed { route: RouteKey, error: NavError },
    /// A newer navigation superseded this one before its fetch completed.
    Stale { route: RouteKey, current: RouteKey },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// Before the initial load has been dispatched.
    Uninitialized,
    Idle(RouteKey),
    Transitioning {
        from: Option<RouteKey>,
        to: RouteKey,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransitionStats {
    pub completed: u64,
    pub failed: u64,
    pub stale_discarded: u64,
    pub ignored_duplicates: u64,
}
