//! View lifecycle controller: the single owner of the current route.

pub mod events;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use shared::{
    domain::{Route, RouteKey},
    error::NavError,
    protocol::{NavigationEvent, NavigationOrigin},
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    content::ContentProvider,
    history::HistoryBridge,
    hooks::ViewInitializers,
    menu::MobileMenu,
    notifier::Notifier,
    routes::RouteTable,
    surface::RenderSurface,
};
use events::{TransitionOutcome, TransitionStats, ViewPhase};

pub const CONTENT_LOAD_FAILED_MESSAGE: &str = "Failed to load page content";

#[derive(Default)]
struct NavigationState {
    current: Option<RouteKey>,
    displayed: Option<RouteKey>,
    in_flight: usize,
}

#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    failed: AtomicU64,
    stale_discarded: AtomicU64,
    ignored_duplicates: AtomicU64,
}

/// Holds one slot of `in_flight` for an accepted transition. Releasing it
/// twice is impossible; dropping it unreleased (the awaiting future was
/// abandoned) still settles the count and takes the overlay down once
/// nothing is left in flight.
struct InFlightSlot {
    state: Arc<Mutex<NavigationState>>,
    notifier: Notifier,
    released: bool,
}

impl InFlightSlot {
    fn release(&mut self, state: &mut NavigationState) {
        if !self.released {
            self.released = true;
            state.in_flight = state.in_flight.saturating_sub(1);
        }
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight == 0 {
            self.notifier.hide_loading();
        }
        debug!(in_flight = state.in_flight, "nav: transition abandoned");
    }
}

/// A transition that passed the guard and is waiting for its content.
pub struct PendingTransition {
    route: Route,
    origin: NavigationOrigin,
    slot: InFlightSlot,
}

impl PendingTransition {
    pub fn route(&self) -> &Route {
        &self.route
    }
}

/// Maps navigation events to rendered views.
///
/// Each accepted event moves the current route immediately, then fetches the
/// target's content and applies it only if the route has not moved on in the
/// meantime. Completions that lost the race are dropped and counted.
pub struct ViewController {
    routes: RouteTable,
    history: HistoryBridge,
    content: Arc<dyn ContentProvider>,
    surface: Arc<dyn RenderSurface>,
    notifier: Notifier,
    initializers: ViewInitializers,
    menu: MobileMenu,
    state: Arc<Mutex<NavigationState>>,
    // Serializes apply/fail so a staleness check and the writes it guards
    // are never interleaved with another completion.
    render_gate: tokio::sync::Mutex<()>,
    counters: Counters,
}

impl ViewController {
    pub fn new(
        routes: RouteTable,
        history: HistoryBridge,
        content: Arc<dyn ContentProvider>,
        surface: Arc<dyn RenderSurface>,
        notifier: Notifier,
    ) -> Self {
        Self {
            routes,
            history,
            content,
            surface,
            notifier,
            initializers: ViewInitializers::default(),
            menu: MobileMenu::new(),
            state: Arc::new(Mutex::new(NavigationState::default())),
            render_gate: tokio::sync::Mutex::new(()),
            counters: Counters::default(),
        }
    }

    pub fn with_initializers(mut self, initializers: ViewInitializers) -> Self {
        self.initializers = initializers;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    /// Current route, or `None` before [`Self::start`].
    pub fn current_route(&self) -> Option<RouteKey> {
        self.lock_state().current.clone()
    }

    /// Route whose content is on screen.
    pub fn displayed_route(&self) -> Option<RouteKey> {
        self.lock_state().displayed.clone()
    }

    pub fn phase(&self) -> ViewPhase {
        let state = self.lock_state();
        match &state.current {
            None => ViewPhase::Uninitialized,
            Some(current) if state.in_flight > 0 => ViewPhase::Transitioning {
                from: state.displayed.clone(),
                to: current.clone(),
            },
            Some(current) => ViewPhase::Idle(current.clone()),
        }
    }

    pub fn stats(&self) -> TransitionStats {
        TransitionStats {
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            stale_discarded: self.counters.stale_discarded.load(Ordering::Relaxed),
            ignored_duplicates: self.counters.ignored_duplicates.load(Ordering::Relaxed),
        }
    }

    /// Renders the route named by the URL at startup.
    pub async fn start(&self) -> TransitionOutcome {
        let key = self.history.current_route_key();
        self.dispatch(NavigationEvent::initial_load(key)).await
    }

    /// User clicked a navigation link for `key`.
    pub async fn navigate_to(&self, key: &str) -> TransitionOutcome {
        self.menu.close(self.surface.as_ref());
        let target = self.routes.resolve(key).key.clone();
        self.history.push_route(&target);
        self.dispatch(NavigationEvent::user_click(target)).await
    }

    /// Browser back/forward landed on `path`. Never pushes a history entry.
    pub async fn handle_pop(&self, path: &str) -> TransitionOutcome {
        let key = self.history.path_to_route_key(path);
        self.dispatch(NavigationEvent::history_pop(key)).await
    }

    pub fn toggle_menu(&self) -> bool {
        self.menu.toggle(self.surface.as_ref())
    }

    pub fn close_menu(&self) -> bool {
        self.menu.close(self.surface.as_ref())
    }

    pub async fn dispatch(&self, event: NavigationEvent) -> TransitionOutcome {
        match self.begin(event) {
            Some(pending) => self.complete(pending).await,
            None => TransitionOutcome::Ignored,
        }
    }

    /// Guard and enter: runs synchronously in event arrival order. Returns
    /// `None` when the target is already the current route.
    pub fn begin(&self, event: NavigationEvent) -> Option<PendingTransition> {
        let route = self.routes.resolve(event.target.as_str()).clone();
        if route.key != event.target {
            debug!(requested = %event.target, route = %route.key, "nav: unknown route, using default");
        }

        {
            let mut state = self.lock_state();
            if state.current.as_ref() == Some(&route.key) {
                self.counters
                    .ignored_duplicates
                    .fetch_add(1, Ordering::Relaxed);
                debug!(route = %route.key, origin = event.origin.as_str(), "nav: already current, ignored");
                return None;
            }
            state.current = Some(route.key.clone());
            state.in_flight += 1;
            // Shown under the state lock so it cannot interleave with a
            // completion deciding whether to hide.
            self.notifier.show_loading();
        }

        info!(route = %route.key, origin = event.origin.as_str(), "nav: transition started");
        Some(PendingTransition {
            route,
            origin: event.origin,
            slot: InFlightSlot {
                state: Arc::clone(&self.state),
                notifier: self.notifier.clone(),
                released: false,
            },
        })
    }

    /// Fetch, then apply or fail unless the transition went stale meanwhile.
    pub async fn complete(&self, pending: PendingTransition) -> TransitionOutcome {
        let PendingTransition {
            route,
            origin,
            mut slot,
        } = pending;
        let fetched = self.content.get_content(&route.content_id).await;

        let _gate = self.render_gate.lock().await;
        let current = {
            let mut state = self.lock_state();
            slot.release(&mut state);
            if state.current.as_ref() != Some(&route.key) && state.in_flight == 0 {
                self.notifier.hide_loading();
            }
            state.current.clone()
        };

        match current {
            Some(current) if current == route.key => {}
            Some(current) => {
                self.counters
                    .stale_discarded
                    .fetch_add(1, Ordering::Relaxed);
                let stale = NavError::StaleCompletion {
                    target: route.key.to_string(),
                    current: current.to_string(),
                };
                debug!(reason = %stale, "nav: completion discarded");
                return TransitionOutcome::Stale {
                    route: route.key,
                    current,
                };
            }
            None => return TransitionOutcome::Ignored,
        }

        match fetched {
            Ok(block) => {
                self.surface.set_content(&block);
                self.surface.set_title(&route.title);
                self.surface.set_active_nav(&route.key);
                self.initializers.activate(&route.key);
                self.settle_loading(&route.key);
                self.surface.scroll_to_top();

                self.lock_state().displayed = Some(route.key.clone());
                self.counters.completed.fetch_add(1, Ordering::Relaxed);
                info!(route = %route.key, origin = origin.as_str(), "nav: transition applied");
                TransitionOutcome::Applied(route.key)
            }
            Err(error) => {
                self.settle_loading(&route.key);
                self.notifier.error(CONTENT_LOAD_FAILED_MESSAGE);
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    route = %route.key,
                    origin = origin.as_str(),
                    code = ?error.code(),
                    error = %error,
                    "nav: content fetch failed"
                );
                TransitionOutcome::Failed {
                    route: route.key,
                    error,
                }
            }
        }
    }

    /// Forwards back/forward notifications from the platform as
    /// `history-pop` events until the platform drops its sender.
    ///
    /// Each pop passes the guard in arrival order; its fetch then runs on its
    /// own task so a later pop can supersede it.
    pub fn listen_history(self: &Arc<Self>) -> JoinHandle<()> {
        let mut pops = self.history.subscribe_pops();
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let path = match pops.recv().await {
                    Ok(path) => path,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "history: pop listener lagged");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                };
                let key = controller.history.path_to_route_key(&path);
                if let Some(pending) = controller.begin(NavigationEvent::history_pop(key)) {
                    let controller = Arc::clone(&controller);
                    tokio::spawn(async move {
                        controller.complete(pending).await;
                    });
                }
            }
            debug!("history: pop listener stopped");
        })
    }

    /// Hides the overlay unless a newer transition started after the
    /// staleness check; that one now owns the overlay.
    fn settle_loading(&self, route: &RouteKey) {
        let state = self.lock_state();
        if state.current.as_ref() == Some(route) {
            self.notifier.hide_loading();
        } else {
            debug!(route = %route, "nav: newer transition pending, overlay kept");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, NavigationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
