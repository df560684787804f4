use std::sync::{Arc, Mutex, PoisonError};

use shared::domain::RouteKey;
use tokio::sync::broadcast;
use tracing::debug;

const POP_CHANNEL_CAPACITY: usize = 64;

/// Platform URL/history mechanism (the browser's `location` + `history`).
pub trait PlatformHistory: Send + Sync {
    fn current_path(&self) -> String;
    fn push_path(&self, path: &str);
    /// Paths reached through back/forward, delivered after the URL changed.
    fn subscribe_pops(&self) -> broadcast::Receiver<String>;
}

/// Maps a URL path to a route key.
///
/// One leading separator is stripped, as are a query string, a fragment and a
/// single trailing separator. An empty remainder yields `default_key`; any
/// other remainder is returned verbatim (no nested path parsing), so unknown
/// segments are left for the route table to default.
pub fn path_to_route_key(path: &str, default_key: &RouteKey) -> RouteKey {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        default_key.clone()
    } else {
        RouteKey::new(path)
    }
}

/// Keeps the platform URL and route keys in sync. Reads and writes the URL
/// only; the current route itself belongs to the controller.
#[derive(Clone)]
pub struct HistoryBridge {
    platform: Arc<dyn PlatformHistory>,
    default_key: RouteKey,
}

impl HistoryBridge {
    pub fn new(platform: Arc<dyn PlatformHistory>, default_key: impl Into<RouteKey>) -> Self {
        Self {
            platform,
            default_key: default_key.into(),
        }
    }

    pub fn default_key(&self) -> &RouteKey {
        &self.default_key
    }

    pub fn path_to_route_key(&self, path: &str) -> RouteKey {
        path_to_route_key(path, &self.default_key)
    }

    pub fn route_path(&self, key: &RouteKey) -> String {
        if key == &self.default_key {
            "/".to_string()
        } else {
            format!("/{key}")
        }
    }

    /// Route key of the URL currently displayed by the platform.
    pub fn current_route_key(&self) -> RouteKey {
        self.path_to_route_key(&self.platform.current_path())
    }

    /// Pushes a history entry for `key` unless the URL already shows it.
    /// Returns whether an entry was written.
    pub fn push_route(&self, key: &RouteKey) -> bool {
        if &self.current_route_key() == key {
            debug!(route = %key, "history: push skipped, url already current");
            return false;
        }
        let path = self.route_path(key);
        debug!(route = %key, path = %path, "history: push");
        self.platform.push_path(&path);
        true
    }

    pub fn subscribe_pops(&self) -> broadcast::Receiver<String> {
        self.platform.subscribe_pops()
    }
}

struct MemoryHistoryState {
    entries: Vec<String>,
    cursor: usize,
    pushes: usize,
}

/// In-memory session history with back/forward navigation, used by the
/// headless shell and in tests.
pub struct MemoryHistory {
    state: Mutex<MemoryHistoryState>,
    pops: broadcast::Sender<String>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let (pops, _) = broadcast::channel(POP_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(MemoryHistoryState {
                entries: vec![initial_path.into()],
                cursor: 0,
                pushes: 0,
            }),
            pops,
        }
    }

    /// Moves one entry back and notifies pop subscribers. Returns `false` at
    /// the start of the history.
    pub fn back(&self) -> bool {
        let path = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.cursor == 0 {
                return false;
            }
            state.cursor -= 1;
            state.entries[state.cursor].clone()
        };
        self.emit_pop(path);
        true
    }

    /// Moves one entry forward and notifies pop subscribers. Returns `false`
    /// at the end of the history.
    pub fn forward(&self) -> bool {
        let path = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.cursor + 1 >= state.entries.len() {
                return false;
            }
            state.cursor += 1;
            state.entries[state.cursor].clone()
        };
        self.emit_pop(path);
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    pub fn push_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pushes
    }

    fn emit_pop(&self, path: String) {
        debug!(path = %path, "history: pop");
        // No subscribers simply means nobody is listening yet.
        let _ = self.pops.send(path);
    }
}

impl PlatformHistory for MemoryHistory {
    fn current_path(&self) -> String {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries[state.cursor].clone()
    }

    fn push_path(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = state.cursor + 1;
        state.entries.truncate(next);
        state.entries.push(path.to_string());
        state.cursor = next;
        state.pushes += 1;
    }

    fn subscribe_pops(&self) -> broadcast::Receiver<String> {
        self.pops.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
