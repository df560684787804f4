use super::*;

fn home() -> RouteKey {
    RouteKey::new("home")
}

#[test]
fn root_and_empty_paths_map_to_default_key() {
    assert_eq!(path_to_route_key("/", &home()), home());
    assert_eq!(path_to_route_key("", &home()), home());
    assert_eq!(path_to_route_key("/?utm=1", &home()), home());
}

#[test]
fn segment_is_taken_verbatim() {
    assert_eq!(path_to_route_key("/profile", &home()), "profile");
    assert_eq!(path_to_route_key("profile", &home()), "profile");
    assert_eq!(path_to_route_key("/profile/", &home()), "profile");
    assert_eq!(path_to_route_key("/a/b", &home()), "a/b");
    assert_eq!(path_to_route_key("/connect?ref=nav#form", &home()), "connect");
}

#[test]
fn default_route_maps_to_bare_path() {
    let history = Arc::new(MemoryHistory::new("/"));
    let bridge = HistoryBridge::new(history, "home");
    assert_eq!(bridge.route_path(&home()), "/");
    assert_eq!(bridge.route_path(&RouteKey::new("connect")), "/connect");
}

#[test]
fn push_route_is_idempotent_for_displayed_key() {
    let history = Arc::new(MemoryHistory::new("/profile"));
    let bridge = HistoryBridge::new(history.clone(), "home");

    assert!(!bridge.push_route(&RouteKey::new("profile")));
    assert_eq!(history.push_count(), 0);

    assert!(bridge.push_route(&RouteKey::new("connect")));
    assert!(bridge.push_route(&home()));
    assert_eq!(history.entries(), ["/profile", "/connect", "/"]);
    assert_eq!(bridge.current_route_key(), home());
}

#[test]
fn push_after_back_truncates_forward_entries() {
    let history = MemoryHistory::new("/");
    history.push_path("/profile");
    history.push_path("/experience");
    assert!(history.back());
    history.push_path("/connect");
    assert_eq!(history.entries(), ["/", "/profile", "/connect"]);
    assert!(!history.forward());
}

#[tokio::test]
async fn back_and_forward_notify_subscribers() {
    let history = MemoryHistory::new("/");
    history.push_path("/profile");
    let mut pops = history.subscribe_pops();

    assert!(history.back());
    assert_eq!(pops.recv().await.expect("pop"), "/");
    assert!(!history.back());

    assert!(history.forward());
    assert_eq!(pops.recv().await.expect("pop"), "/profile");
    assert_eq!(history.current_path(), "/profile");
    assert_eq!(history.push_count(), 1);
}
