use std::{sync::Arc, time::Duration};

use shared::domain::{Route, RouteKey};
use view_core::{
    HistoryBridge, MemoryHistory, Notifier, RouteTable, StaticContentProvider, SurfaceCall,
    SurfaceJournal, TransitionOutcome, ViewController, ViewPhase,
};

fn build(initial_path: &str, latency: Duration) -> (Arc<ViewController>, SurfaceJournal, Arc<MemoryHistory>) {
    let routes = RouteTable::new(
        [
            Route::new("home", "Portfolio - Home", "home"),
            Route::new("profile", "Portfolio - Profile", "profile"),
            Route::new("experience", "Portfolio - Experience", "experience"),
            Route::new("connect", "Portfolio - Connect", "connect"),
        ],
        "home",
    )
    .expect("route table");
    let content = StaticContentProvider::new()
        .with_block("home", "<section class=\"hero-area\"></section>")
        .with_block("profile", "<section class=\"profile\"></section>")
        .with_block("experience", "<section class=\"experience\"></section>")
        .with_block("connect", "<form id=\"contact-form\"></form>")
        .with_latency(latency);

    let journal = SurfaceJournal::new();
    let history = Arc::new(MemoryHistory::new(initial_path));
    let controller = ViewController::new(
        routes,
        HistoryBridge::new(history.clone(), "home"),
        Arc::new(content),
        Arc::new(journal.clone()),
        Notifier::new(Arc::new(journal.clone())),
    );
    (Arc::new(controller), journal, history)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clicks_settle_on_last_accepted_route() {
    let (controller, journal, _history) = build("/", Duration::from_millis(5));
    controller.start().await;

    let mut tasks = Vec::new();
    for key in ["profile", "experience", "connect", "profile", "experience"] {
        let controller = controller.clone();
        tasks.push(tokio::spawn(async move { controller.navigate_to(key).await }));
    }
    for task in tasks {
        task.await.expect("join");
    }

    let current = controller.current_route().expect("initialized");
    assert_eq!(controller.phase(), ViewPhase::Idle(current.clone()));
    assert_eq!(controller.displayed_route(), Some(current.clone()));
    assert_eq!(journal.active_nav(), Some(current.clone()));
    assert_eq!(
        journal.content().map(|block| block.content_id),
        Some(current.to_string())
    );
    assert!(!controller.notifier().is_loading());
}

#[tokio::test]
async fn browsing_session_keeps_url_and_view_in_step() {
    let (controller, journal, history) = build("/experience", Duration::ZERO);

    assert_eq!(
        controller.start().await,
        TransitionOutcome::Applied(RouteKey::new("experience"))
    );
    controller.navigate_to("connect").await;
    controller.navigate_to("home").await;
    controller.navigate_to("home").await;

    assert_eq!(history.entries(), ["/experience", "/connect", "/"]);
    assert_eq!(journal.title().as_deref(), Some("Portfolio - Home"));

    let stats = controller.stats();
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.ignored_duplicates, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(
        journal.count(|call| matches!(call, SurfaceCall::ScrollReset)),
        3
    );
}
