//! Built-in page content and per-page setup hooks for the headless shell.

use std::sync::Arc;

use shared::domain::{Route, RouteKey};
use tracing::info;
use view_core::{StaticContentProvider, ViewInitializer, ViewInitializers};

/// Markup for a route's content id. Well-known pages get their section
/// skeleton; anything else gets a generic placeholder.
fn markup_for(content_id: &str) -> String {
    match content_id {
        "home" => r#"<section class="hero-area"><h1 class="typing-text"></h1></section>"#.to_string(),
        "profile" => r#"<section class="profile-area"><div class="skill-progress"></div></section>"#
            .to_string(),
        "experience" => r#"<section class="experience-area"><div class="experience-item"></div></section>"#
            .to_string(),
        "connect" => r#"<section class="connect-area"><form id="contact-form"></form></section>"#
            .to_string(),
        other => format!(r#"<section class="{other}-area"></section>"#),
    }
}

pub fn content_for(routes: &[Route]) -> StaticContentProvider {
    let mut provider = StaticContentProvider::new();
    for route in routes {
        provider.insert(route.content_id.as_str(), markup_for(&route.content_id));
    }
    provider
}

struct SkillBars;

impl ViewInitializer for SkillBars {
    fn on_activate(&self, route: &RouteKey) -> anyhow::Result<()> {
        info!(route = %route, "page: skill bars armed");
        Ok(())
    }
}

struct ContactFormWiring;

impl ViewInitializer for ContactFormWiring {
    fn on_activate(&self, route: &RouteKey) -> anyhow::Result<()> {
        info!(route = %route, "page: contact form wired");
        Ok(())
    }
}

pub fn initializers() -> ViewInitializers {
    let skill_bars: Arc<dyn ViewInitializer> = Arc::new(SkillBars);
    ViewInitializers::new()
        .with("home", skill_bars.clone())
        .with("profile", skill_bars)
        .with("connect", Arc::new(ContactFormWiring))
}
