use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::meta::{Route, RouteMetadata};

static NEXT_ROUTER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle identifying the router (or scope) that registered a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouterId(u64);

impl RouterId {
    /// The owner of routes registered directly on a table or built detached.
    pub const ROOT: RouterId = RouterId(0);

    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        RouterId(NEXT_ROUTER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Read-only view over a list of routes.
///
/// Documentation generators take this instead of owning the routes, and call
/// it on every build so routes registered later are still picked up.
pub trait RouteSource: Send + Sync {
    /// A snapshot of the routes in registration order.
    fn routes(&self) -> Vec<Route>;
}

impl RouteSource for Vec<Route> {
    fn routes(&self) -> Vec<Route> {
        self.clone()
    }
}

impl RouteSource for [Route] {
    fn routes(&self) -> Vec<Route> {
        self.to_vec()
    }
}

impl<T: RouteSource + ?Sized> RouteSource for Arc<T> {
    fn routes(&self) -> Vec<Route> {
        (**self).routes()
    }
}

/// Shared, append-only list of registered routes.
///
/// Cloning yields another handle to the same list. Routes are never removed
/// or modified once registered.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Arc<RwLock<Vec<Route>>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route as-is.
    pub fn register(&self, route: Route) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }

    /// Register a terminal route owned by the root router.
    pub fn route(&self, method: &str, path: &str, metadata: RouteMetadata) {
        self.register(Route::new(method, path, metadata));
    }

    /// Register a method-less mount entry owned by the root router.
    pub fn mount(&self, path: &str, metadata: RouteMetadata) {
        self.register(Route::mount(path, metadata));
    }

    /// Open a scope writing into this table under `prefix`, with its own owner id.
    pub fn scope(&self, prefix: &str) -> RouteScope {
        RouteScope {
            table: self.clone(),
            prefix: prefix.trim_end_matches('/').to_string(),
            owner: RouterId::next(),
        }
    }

    pub fn snapshot(&self) -> Vec<Route> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteSource for RouteTable {
    fn routes(&self) -> Vec<Route> {
        self.snapshot()
    }
}

/// A sub-router's window onto a [`RouteTable`].
///
/// Paths registered through a scope are prefixed and tagged with the scope's
/// owner id.
#[derive(Debug, Clone)]
pub struct RouteScope {
    table: RouteTable,
    prefix: String,
    owner: RouterId,
}

impl RouteScope {
    pub fn owner(&self) -> RouterId {
        self.owner
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn route(&self, method: &str, path: &str, metadata: RouteMetadata) {
        let route = Route::new(method, &join_paths(&self.prefix, path), metadata);
        self.table.register(route.with_owner(self.owner));
    }

    pub fn mount(&self, path: &str, metadata: RouteMetadata) {
        let route = Route::mount(&join_paths(&self.prefix, path), metadata);
        self.table.register(route.with_owner(self.owner));
    }

    /// Open a nested scope. Its prefix is appended to this scope's prefix.
    pub fn scope(&self, prefix: &str) -> RouteScope {
        RouteScope {
            table: self.table.clone(),
            prefix: join_paths(&self.prefix, prefix.trim_end_matches('/')),
            owner: RouterId::next(),
        }
    }
}

/// Join a mount prefix and a route path, keeping exactly one `/` between them.
pub(crate) fn join_paths(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match (prefix.is_empty(), path) {
        (true, "") => "/".to_string(),
        (true, path) => path.to_string(),
        (false, "" | "/") => prefix.to_string(),
        (false, path) if path.starts_with('/') => format!("{prefix}{path}"),
        (false, path) => format!("{prefix}/{path}"),
    }
}
