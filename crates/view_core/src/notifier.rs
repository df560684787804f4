use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use shared::domain::{NotificationId, NotificationKind};
use tokio::{task::JoinHandle, time::Instant};
use tracing::{debug, info};

use crate::surface::OverlaySurface;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

struct ActiveNotification {
    notification: Notification,
    expiry: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct NotifierState {
    loading: bool,
    next_id: u64,
    active: HashMap<NotificationId, ActiveNotification>,
}

struct NotifierInner {
    overlay: Arc<dyn OverlaySurface>,
    ttl: Duration,
    state: Mutex<NotifierState>,
}

impl NotifierInner {
    fn lock(&self) -> std::sync::MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes `id` if it is still attached. Exactly one caller wins, so an
    /// expiry racing a manual dismissal never detaches twice.
    fn remove(&self, id: NotificationId) -> Option<ActiveNotification> {
        let removed = self.lock().active.remove(&id);
        if removed.is_some() {
            self.overlay.detach_notification(id);
        }
        removed
    }
}

/// Loading overlay and timed notification banners.
///
/// Cheap to clone; clones share the same overlay and state. Creating a
/// notification schedules its expiry on the current tokio runtime.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    pub fn new(overlay: Arc<dyn OverlaySurface>) -> Self {
        Self::with_ttl(overlay, DEFAULT_NOTIFICATION_TTL)
    }

    pub fn with_ttl(overlay: Arc<dyn OverlaySurface>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                overlay,
                ttl,
                state: Mutex::new(NotifierState::default()),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Shows the loading overlay unless it is already up. Returns whether the
    /// overlay was attached by this call.
    pub fn show_loading(&self) -> bool {
        {
            let mut state = self.inner.lock();
            if state.loading {
                return false;
            }
            state.loading = true;
        }
        self.inner.overlay.show_loading_overlay();
        true
    }

    /// Hides the loading overlay; a no-op when nothing is shown.
    pub fn hide_loading(&self) -> bool {
        {
            let mut state = self.inner.lock();
            if !state.loading {
                return false;
            }
            state.loading = false;
        }
        self.inner.overlay.hide_loading_overlay();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().loading
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Error)
    }

    /// Attaches a notification and schedules its removal after the TTL.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let notification = {
            let mut state = self.inner.lock();
            state.next_id += 1;
            let notification = Notification {
                id: NotificationId(state.next_id),
                message: message.into(),
                kind,
                created_at: Instant::now(),
            };
            state.active.insert(
                notification.id,
                ActiveNotification {
                    notification: notification.clone(),
                    expiry: None,
                },
            );
            notification
        };
        let id = notification.id;
        info!(id = id.0, kind = ?kind, message = %notification.message, "notify: shown");
        self.inner.overlay.attach_notification(&notification);

        let inner = Arc::downgrade(&self.inner);
        let deadline = notification.created_at + self.inner.ttl;
        let expiry = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = inner.upgrade() {
                if inner.remove(id).is_some() {
                    debug!(id = id.0, "notify: expired");
                }
            }
        });

        let mut state = self.inner.lock();
        match state.active.get_mut(&id) {
            Some(active) => active.expiry = Some(expiry),
            None => expiry.abort(),
        }
        id
    }

    /// Removes a notification before it expires and cancels its scheduled
    /// removal. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let Some(active) = self.inner.remove(id) else {
            return false;
        };
        if let Some(expiry) = active.expiry {
            expiry.abort();
        }
        debug!(id = id.0, "notify: dismissed");
        true
    }

    /// Notifications currently attached, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        let mut active: Vec<Notification> = self
            .inner
            .lock()
            .active
            .values()
            .map(|active| active.notification.clone())
            .collect();
        active.sort_by_key(|notification| notification.id);
        active
    }
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
