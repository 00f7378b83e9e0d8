use std::convert::Infallible;

use axum::extract::Request;
use axum::handler::Handler;
use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::{on, MethodFilter, MethodRouter, Route as AxumRoute};
use axum::Router;
use tower::{Layer, Service};

use crate::meta::{Route, RouteMetadata};
use crate::pattern::translate;
use crate::plugin::Plugin;
use crate::table::{join_paths, RouteTable, RouterId};

/// An axum [`Router`] that records every route it mounts in a [`RouteTable`].
///
/// Route patterns use the `:name` / `:name?` syntax. Each pattern is mounted
/// under every path template it translates to, so `/users/:id?` answers both
/// `/users` and `/users/{id}`. Parenthesised matchers are documentation-only
/// here: axum matches any segment value.
///
/// Registering the same method on the same template twice is not an error:
/// the later handler replaces the earlier one, matching how the generated
/// document resolves the collision. Handlers are kept per template and only
/// handed to axum by [`ApiRouter::layer`], [`ApiRouter::mount`] (for the
/// child) and [`ApiRouter::into_router`].
///
/// ```ignore
/// let app = ApiRouter::new()
///     .get("/users/:id?", list_or_get, RouteMetadata::new())
///     .with(SwaggerPlugin::new(SwaggerConfig::new("Users", "1.0.0")))
///     .into_router();
/// ```
pub struct ApiRouter<S = ()> {
    router: Router<S>,
    endpoints: Vec<Endpoint<S>>,
    mounted: Vec<(String, Method)>,
    table: RouteTable,
}

/// Handlers waiting to be mounted on one path, one per method.
struct Endpoint<S> {
    path: String,
    handlers: Vec<(Method, MethodRouter<S>)>,
}

impl<S> ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_table(RouteTable::new())
    }

    /// Build on an existing table, e.g. one shared with another component.
    pub fn with_table(table: RouteTable) -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
            mounted: Vec::new(),
            table,
        }
    }

    /// Mount `handler` for `method` on every template of `pattern` and record the route.
    pub fn route<H, T>(mut self, method: Method, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        match MethodFilter::try_from(method.clone()) {
            Ok(filter) => {
                for variant in translate(pattern) {
                    match axum_path(&variant.template) {
                        Some(path) => self.insert(path, method.clone(), on(filter, handler.clone())),
                        None => tracing::warn!(
                            pattern,
                            template = %variant.template,
                            "template cannot be routed by axum; recording for documentation only"
                        ),
                    }
                }
            }
            Err(_) => {
                tracing::warn!(%method, pattern, "method cannot be routed by axum; recording for documentation only");
            }
        }
        self.table.route(method.as_str(), pattern, metadata);
        self
    }

    pub fn get<H, T>(self, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::GET, pattern, handler, metadata)
    }

    pub fn post<H, T>(self, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::POST, pattern, handler, metadata)
    }

    pub fn put<H, T>(self, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::PUT, pattern, handler, metadata)
    }

    pub fn patch<H, T>(self, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::PATCH, pattern, handler, metadata)
    }

    pub fn delete<H, T>(self, pattern: &str, handler: H, metadata: RouteMetadata) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::DELETE, pattern, handler, metadata)
    }

    /// Nest `child` under `prefix`.
    ///
    /// Records a method-less mount entry for the prefix followed by the
    /// child's routes rewritten under the prefix. The child's routes are
    /// copied at this point; register them before mounting.
    pub fn mount(mut self, prefix: &str, child: ApiRouter<S>) -> Self {
        let owner = RouterId::next();
        let child_table = child.table.clone();
        let child_router = child.into_router();

        for variant in translate(prefix) {
            match axum_path(&variant.template).as_deref() {
                Some("/") => self.router = self.router.merge(child_router.clone()),
                Some(path) => self.router = self.router.nest(path, child_router.clone()),
                None => tracing::warn!(
                    prefix,
                    template = %variant.template,
                    "prefix cannot be routed by axum; recording for documentation only"
                ),
            }
        }

        self.table
            .register(Route::mount(prefix, RouteMetadata::default()).with_owner(owner));
        for mut route in child_table.snapshot() {
            route.path = join_paths(prefix, &route.path);
            if route.owner == RouterId::ROOT {
                route.owner = owner;
            }
            self.table.register(route);
        }
        self
    }

    /// Merge a plain axum router. Its routes are not documented.
    pub fn merge(mut self, router: Router<S>) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// Apply a tower layer to every route registered so far.
    ///
    /// Routes registered so far are handed to axum here, so a later
    /// registration of the same method and template keeps the earlier,
    /// layered handler.
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<AxumRoute> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.flush();
        self.router = self.router.layer(layer);
        self
    }

    /// Install a plugin.
    pub fn with<P: Plugin>(self, plugin: P) -> Self {
        tracing::debug!(plugin = P::name(), "installing plugin");
        plugin.install(self)
    }

    /// The table this router records into. Cloning it shares the same list.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn into_router(mut self) -> Router<S> {
        self.flush();
        self.router
    }

    fn insert(&mut self, path: String, method: Method, handler: MethodRouter<S>) {
        if self.mounted.iter().any(|(p, m)| *p == path && *m == method) {
            tracing::warn!(%method, path = %path, "route already sealed by a layer; keeping the earlier handler");
            return;
        }
        match self.endpoints.iter_mut().find(|e| e.path == path) {
            Some(endpoint) => {
                endpoint.handlers.retain(|(m, _)| *m != method);
                endpoint.handlers.push((method, handler));
            }
            None => self.endpoints.push(Endpoint {
                path,
                handlers: vec![(method, handler)],
            }),
        }
    }

    /// Hand every pending handler to the axum router.
    fn flush(&mut self) {
        for endpoint in std::mem::take(&mut self.endpoints) {
            let mut handlers = endpoint.handlers.into_iter();
            let Some((method, first)) = handlers.next() else {
                continue;
            };
            self.mounted.push((endpoint.path.clone(), method));
            let combined = handlers.fold(first, |acc, (method, handler)| {
                self.mounted.push((endpoint.path.clone(), method));
                acc.merge(handler)
            });
            self.router = std::mem::take(&mut self.router).route(&endpoint.path, combined);
        }
    }
}

impl<S> Default for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// The axum route path for a template, or `None` when axum would reject it.
///
/// Templates are made absolute, so an optional first segment (which yields an
/// empty template) maps to `/`. Literal segments starting with `:` or `*`, or
/// carrying stray braces, cannot be expressed in axum 0.8 syntax.
fn axum_path(template: &str) -> Option<String> {
    let path = if template.starts_with('/') {
        template.to_string()
    } else {
        format!("/{template}")
    };
    path.split('/').all(routable_segment).then_some(path)
}

fn routable_segment(segment: &str) -> bool {
    if segment.starts_with(':') || segment.starts_with('*') {
        return false;
    }
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(name) => !name.is_empty() && !name.contains(['{', '}']),
        None => !segment.contains(['{', '}']),
    }
}
