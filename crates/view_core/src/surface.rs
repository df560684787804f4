//! Display seams. A browser build performs real DOM writes behind these
//! traits; the headless [`crate::SurfaceJournal`] records the calls instead.

use shared::{
    domain::{NotificationId, RouteKey},
    protocol::ContentBlock,
};

use crate::notifier::Notification;

/// Where the active view is rendered.
pub trait RenderSurface: Send + Sync {
    fn set_content(&self, block: &ContentBlock);
    fn set_title(&self, title: &str);
    fn set_active_nav(&self, route: &RouteKey);
    fn scroll_to_top(&self);

    fn set_menu_open(&self, _open: bool) {}
}

/// Where transient UI (loading overlay, notification banners) is attached.
pub trait OverlaySurface: Send + Sync {
    fn show_loading_overlay(&self);
    fn hide_loading_overlay(&self);
    fn attach_notification(&self, notification: &Notification);
    fn detach_notification(&self, id: NotificationId);
}
