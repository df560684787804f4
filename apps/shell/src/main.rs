use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shared::domain::RouteKey;
use tracing::info;
use tracing_subscriber::EnvFilter;
use view_core::{
    ContactForm, ContactFormHandler, HistoryBridge, MemoryHistory, Notifier, PlatformHistory,
    SimulatedSender, SubmitOutcome, SurfaceCall, SurfaceJournal, TransitionStats, ViewController,
};

mod config;
mod pages;

/// Replays a navigation session against the view controller and prints the
/// recorded display transcript as JSON.
#[derive(Parser, Debug)]
struct Args {
    /// Shell config file (defaults to ./shell.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// URL path the session starts on.
    #[arg(long, default_value = "/")]
    path: String,
    /// Steps to run in order: a route key, `back`, `forward`, `menu` or `contact`.
    steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Visit(String),
    Back,
    Forward,
    Menu,
    Contact,
}

impl Step {
    fn parse(raw: &str) -> Self {
        match raw {
            "back" => Self::Back,
            "forward" => Self::Forward,
            "menu" => Self::Menu,
            "contact" => Self::Contact,
            key => Self::Visit(key.to_string()),
        }
    }
}

#[derive(Serialize)]
struct Transcript {
    route: Option<RouteKey>,
    history: Vec<String>,
    stats: TransitionStats,
    contact: Vec<SubmitOutcome>,
    calls: Vec<SurfaceCall>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = config::load_settings(args.config.as_deref())?;
    let routes = settings.route_table().context("invalid route configuration")?;
    let content = pages::content_for(&settings.resolved_routes()).with_latency(settings.content_latency());

    let journal = SurfaceJournal::new();
    let history = Arc::new(MemoryHistory::new(args.path.clone()));
    let notifier = Notifier::with_ttl(Arc::new(journal.clone()), settings.notification_ttl());
    let controller = ViewController::new(
        routes,
        HistoryBridge::new(history.clone(), settings.default_route.as_str()),
        Arc::new(content),
        Arc::new(journal.clone()),
        notifier.clone(),
    )
    .with_initializers(pages::initializers());
    let contact = ContactFormHandler::new(
        Arc::new(SimulatedSender::new(settings.contact_delay())),
        notifier,
    );

    let mut pops = history.subscribe_pops();
    let outcome = controller.start().await;
    info!(outcome = ?outcome, "shell: initial load");

    let mut contact_outcomes = Vec::new();
    for step in args.steps.iter().map(|raw| Step::parse(raw)) {
        match step {
            Step::Visit(key) => {
                let outcome = controller.navigate_to(&key).await;
                info!(route = %key, outcome = ?outcome, "shell: visit");
            }
            Step::Back | Step::Forward => {
                let moved = if step == Step::Back {
                    history.back()
                } else {
                    history.forward()
                };
                if !moved {
                    info!(step = ?step, "shell: no history entry in that direction");
                    continue;
                }
                let path = pops.recv().await.context("history pop channel closed")?;
                let outcome = controller.handle_pop(&path).await;
                info!(path = %path, outcome = ?outcome, "shell: history pop");
            }
            Step::Menu => {
                let open = controller.toggle_menu();
                info!(open, "shell: menu toggled");
            }
            Step::Contact => {
                let form = ContactForm {
                    name: "Visitor".to_string(),
                    email: "visitor@example.com".to_string(),
                    subject: "Hello".to_string(),
                    message: "Sent from the shell".to_string(),
                };
                contact_outcomes.push(contact.submit(&form).await);
            }
        }
    }

    let transcript = Transcript {
        route: controller.current_route(),
        history: history.entries(),
        stats: controller.stats(),
        contact: contact_outcomes,
        calls: journal.calls(),
    };
    println!("{}", serde_json::to_string_pretty(&transcript)?);
    Ok(())
}
