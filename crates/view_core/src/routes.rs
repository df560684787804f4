use std::collections::HashMap;

use shared::{
    domain::{Route, RouteKey},
    error::{NavError, RouteTableError},
};

/// Immutable route table. Lookups are O(1) by key and unknown keys fall back
/// to the default route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<RouteKey, usize>,
    default_index: usize,
}

impl RouteTable {
    pub fn new(
        routes: impl IntoIterator<Item = Route>,
        default_key: impl Into<RouteKey>,
    ) -> Result<Self, RouteTableError> {
        let routes: Vec<Route> = routes.into_iter().collect();
        if routes.is_empty() {
            return Err(RouteTableError::Empty);
        }

        let mut index = HashMap::with_capacity(routes.len());
        for (position, route) in routes.iter().enumerate() {
            if route.key.as_str().trim().is_empty() {
                return Err(RouteTableError::EmptyKey);
            }
            if index.insert(route.key.clone(), position).is_some() {
                return Err(RouteTableError::DuplicateKey(route.key.to_string()));
            }
        }

        let default_key = default_key.into();
        let default_index = *index
            .get(&default_key)
            .ok_or_else(|| RouteTableError::MissingDefault(default_key.to_string()))?;

        Ok(Self {
            routes,
            index,
            default_index,
        })
    }

    /// Returns the route for `key`, or the default route when `key` is unknown.
    pub fn resolve(&self, key: &str) -> &Route {
        self.index
            .get(key)
            .map(|position| &self.routes[*position])
            .unwrap_or_else(|| self.default_route())
    }

    pub fn get(&self, key: &str) -> Result<&Route, NavError> {
        self.index
            .get(key)
            .map(|position| &self.routes[*position])
            .ok_or_else(|| NavError::UnknownRoute(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn default_route(&self) -> &Route {
        &self.routes[self.default_index]
    }

    pub fn default_key(&self) -> &RouteKey {
        &self.default_route().key
    }

    /// Route keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.routes.iter().map(|route| &route.key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
