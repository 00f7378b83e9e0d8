//! Plugin system for routedoc.
//!
//! Plugins are composable units of functionality that can be installed into an
//! [`ApiRouter`] using the `.with(plugin)` method.

use crate::router::ApiRouter;

/// A composable unit of functionality that can be installed into an [`ApiRouter`].
///
/// Plugins can add routes, record metadata in the route table, or wrap the
/// router in layers.
///
/// # Example
///
/// ```ignore
/// use routedoc_core::{ApiRouter, Plugin, RouteMetadata};
///
/// pub struct Health;
///
/// impl Plugin for Health {
///     fn install<S: Clone + Send + Sync + 'static>(self, app: ApiRouter<S>) -> ApiRouter<S> {
///         app.get("/health", || async { "OK" }, RouteMetadata::hidden())
///     }
/// }
/// ```
pub trait Plugin: Send + 'static {
    /// Install this plugin into the given `ApiRouter`, returning the modified router.
    fn install<S: Clone + Send + Sync + 'static>(self, app: ApiRouter<S>) -> ApiRouter<S>;

    /// The name of this plugin (for diagnostics).
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}
