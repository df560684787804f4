use std::{collections::HashMap, sync::Arc};

use shared::domain::RouteKey;
use tracing::{debug, warn};

/// Per-route setup run after a view's content has been rendered.
///
/// Hooks are fire-and-forget: an error is logged and never reaches the
/// controller.
pub trait ViewInitializer: Send + Sync {
    fn on_activate(&self, route: &RouteKey) -> anyhow::Result<()>;
}

impl<F> ViewInitializer for F
where
    F: Fn(&RouteKey) -> anyhow::Result<()> + Send + Sync,
{
    fn on_activate(&self, route: &RouteKey) -> anyhow::Result<()> {
        self(route)
    }
}

#[derive(Clone, Default)]
pub struct ViewInitializers {
    hooks: HashMap<RouteKey, Vec<Arc<dyn ViewInitializer>>>,
}

impl ViewInitializers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, route: impl Into<RouteKey>, hook: Arc<dyn ViewInitializer>) {
        self.hooks.entry(route.into()).or_default().push(hook);
    }

    pub fn with(mut self, route: impl Into<RouteKey>, hook: Arc<dyn ViewInitializer>) -> Self {
        self.register(route, hook);
        self
    }

    /// Runs every hook registered for `route` in registration order and
    /// returns how many ran. Routes without hooks are skipped.
    pub fn activate(&self, route: &RouteKey) -> usize {
        let Some(hooks) = self.hooks.get(route) else {
            debug!(route = %route, "nav: no initializer registered");
            return 0;
        };
        for hook in hooks {
            if let Err(err) = hook.on_activate(route) {
                warn!(route = %route, error = %err, "nav: view initializer failed");
            }
        }
        hooks.len()
    }
}
