use serde::{Deserialize, Serialize};

use crate::domain::RouteKey;

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationOrigin {
    UserClick,
    HistoryPop,
    InitialLoad,
}

impl NavigationOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserClick => "user-click",
            Self::HistoryPop => "history-pop",
            Self::InitialLoad => "initial-load",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub target: RouteKey,
    pub origin: NavigationOrigin,
}

impl NavigationEvent {
    pub fn new(target: impl Into<RouteKey>, origin: NavigationOrigin) -> Self {
        Self {
            target: target.into(),
            origin,
        }
    }

    pub fn user_click(target: impl Into<RouteKey>) -> Self {
        Self::new(target, NavigationOrigin::UserClick)
    }

    pub fn history_pop(target: impl Into<RouteKey>) -> Self {
        Self::new(target, NavigationOrigin::HistoryPop)
    }

    pub fn initial_load(target: impl Into<RouteKey>) -> Self {
        Self::new(target, NavigationOrigin::InitialLoad)
    }
}

/// Renderable content produced by a content provider for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub content_id: String,
    pub markup: String,
}

impl ContentBlock {
    pub fn new(content_id: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            markup: markup.into(),
        }
    }
}
