use super::*;

fn portfolio_table() -> RouteTable {
    RouteTable::new(
        [
            Route::new("home", "Portfolio - Home", "home"),
            Route::new("profile", "Portfolio - Profile", "profile"),
            Route::new("experience", "Portfolio - Experience", "experience"),
            Route::new("connect", "Portfolio - Connect", "connect"),
        ],
        "home",
    )
    .expect("route table")
}

#[test]
fn resolves_every_declared_key_to_itself() {
    let table = portfolio_table();
    let keys: Vec<RouteKey> = table.keys().cloned().collect();
    assert_eq!(keys.len(), 4);
    for key in keys {
        assert_eq!(table.resolve(key.as_str()).key, key);
    }
}

#[test]
fn unknown_keys_resolve_to_default_route() {
    let table = portfolio_table();
    for key in ["", "blog", "HOME", "profile/extra", "../etc"] {
        assert_eq!(table.resolve(key).key, "home", "key {key:?}");
    }
}

#[test]
fn strict_lookup_reports_unknown_route() {
    let table = portfolio_table();
    assert_eq!(
        table.get("blog").expect_err("unknown"),
        NavError::UnknownRoute("blog".to_string())
    );
    assert_eq!(table.get("connect").expect("known").title, "Portfolio - Connect");
    assert!(table.contains("experience"));
    assert!(!table.contains("blog"));
}

#[test]
fn keys_keep_declaration_order() {
    let table = portfolio_table();
    let keys: Vec<&str> = table.keys().map(RouteKey::as_str).collect();
    assert_eq!(keys, ["home", "profile", "experience", "connect"]);
    assert_eq!(table.default_key(), &RouteKey::new("home"));
}

#[test]
fn rejects_invalid_tables() {
    assert_eq!(
        RouteTable::new(Vec::<Route>::new(), "home").expect_err("empty"),
        RouteTableError::Empty
    );
    assert_eq!(
        RouteTable::new(
            [Route::new("home", "a", "a"), Route::new("home", "b", "b")],
            "home"
        )
        .expect_err("duplicate"),
        RouteTableError::DuplicateKey("home".to_string())
    );
    assert_eq!(
        RouteTable::new([Route::new(" ", "a", "a")], " ").expect_err("empty key"),
        RouteTableError::EmptyKey
    );
    assert_eq!(
        RouteTable::new([Route::new("home", "a", "a")], "profile").expect_err("default"),
        RouteTableError::MissingDefault("profile".to_string())
    );
}
