use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use shared::{
    domain::{NotificationId, NotificationKind, RouteKey},
    protocol::ContentBlock,
};
use tracing::debug;

use crate::{
    notifier::Notification,
    surface::{OverlaySurface, RenderSurface},
};

/// One observable side effect on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SurfaceCall {
    LoadingShown,
    LoadingHidden,
    ContentReplaced {
        content_id: String,
    },
    TitleChanged {
        title: String,
    },
    NavHighlighted {
        route: RouteKey,
    },
    InitializerInvoked {
        route: RouteKey,
    },
    ScrollReset,
    MenuOpen {
        open: bool,
    },
    NotificationShown {
        id: NotificationId,
        kind: NotificationKind,
        message: String,
    },
    NotificationRemoved {
        id: NotificationId,
    },
}

/// Headless render and overlay surface that records every call in order.
///
/// Clones share the same log, so one journal can back both surfaces and any
/// initializer hooks that want their invocation recorded alongside.
#[derive(Debug, Clone, Default)]
pub struct SurfaceJournal {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
    content: Arc<Mutex<Option<ContentBlock>>>,
    title: Arc<Mutex<Option<String>>>,
}

impl SurfaceJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: SurfaceCall) {
        debug!(call = ?call, "surface: call");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the recorded calls.
    pub fn take(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Content currently rendered, if any.
    pub fn content(&self) -> Option<ContentBlock> {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn title(&self) -> Option<String> {
        self.title
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Route currently highlighted in the navigation bar.
    pub fn active_nav(&self) -> Option<RouteKey> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::NavHighlighted { route } => Some(route.clone()),
                _ => None,
            })
    }

    pub fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| predicate(*call))
            .count()
    }
}

impl RenderSurface for SurfaceJournal {
    fn set_content(&self, block: &ContentBlock) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(block.clone());
        self.record(SurfaceCall::ContentReplaced {
            content_id: block.content_id.clone(),
        });
    }

    fn set_title(&self, title: &str) {
        *self.title.lock().unwrap_or_else(PoisonError::into_inner) = Some(title.to_string());
        self.record(SurfaceCall::TitleChanged {
            title: title.to_string(),
        });
    }

    fn set_active_nav(&self, route: &RouteKey) {
        self.record(SurfaceCall::NavHighlighted {
            route: route.clone(),
        });
    }

    fn scroll_to_top(&self) {
        self.record(SurfaceCall::ScrollReset);
    }

    fn set_menu_open(&self, open: bool) {
        self.record(SurfaceCall::MenuOpen { open });
    }
}

impl OverlaySurface for SurfaceJournal {
    fn show_loading_overlay(&self) {
        self.record(SurfaceCall::LoadingShown);
    }

    fn hide_loading_overlay(&self) {
        self.record(SurfaceCall::LoadingHidden);
    }

    fn attach_notification(&self, notification: &Notification) {
        self.record(SurfaceCall::NotificationShown {
            id: notification.id,
            kind: notification.kind,
            message: notification.message.clone(),
        });
    }

    fn detach_notification(&self, id: NotificationId) {
        self.record(SurfaceCall::NotificationRemoved { id });
    }
}
