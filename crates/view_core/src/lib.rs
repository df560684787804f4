//! Navigation and view-lifecycle core for a single-page application shell.
//!
//! The [`ViewController`] owns the current route and drives every transition:
//! it resolves keys through the [`RouteTable`], keeps the URL in sync through
//! the [`HistoryBridge`], fetches content from a [`ContentProvider`], writes
//! the result to a [`RenderSurface`] and reports progress through the
//! [`Notifier`]. Every collaborator is injected, so the whole lifecycle runs
//! headless against in-memory implementations.

pub mod contact;
pub mod content;
pub mod controller;
pub mod history;
pub mod hooks;
pub mod journal;
pub mod menu;
pub mod notifier;
pub mod routes;
pub mod surface;

pub use contact::{ContactForm, ContactFormHandler, ContactSender, SimulatedSender, SubmitOutcome};
pub use content::{ContentProvider, StaticContentProvider};
pub use controller::{
    events::{TransitionOutcome, TransitionStats, ViewPhase},
    ViewController, CONTENT_LOAD_FAILED_MESSAGE,
};
pub use history::{path_to_route_key, HistoryBridge, MemoryHistory, PlatformHistory};
pub use hooks::{ViewInitializer, ViewInitializers};
pub use journal::{SurfaceCall, SurfaceJournal};
pub use menu::MobileMenu;
pub use notifier::{Notification, Notifier, DEFAULT_NOTIFICATION_TTL};
pub use routes::RouteTable;
pub use surface::{OverlaySurface, RenderSurface};
