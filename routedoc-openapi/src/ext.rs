use std::sync::Arc;

use routedoc_core::meta::RouteMetadata;
use routedoc_core::{ApiRouter, Plugin};

use crate::handlers::swagger_handlers;
use crate::SwaggerConfig;

/// Plugin that serves the generated document and the Swagger UI page.
///
/// Both endpoints are registered as hidden routes, so they never document
/// themselves. The document reads the table on every request, which means
/// routes added after the plugin are still listed. An application route on
/// `/swagger` or `/swagger.json` registered after the plugin replaces it.
///
/// # Example
///
/// ```ignore
/// use routedoc_openapi::{SwaggerConfig, SwaggerPlugin};
///
/// ApiRouter::new()
///     .with(SwaggerPlugin::new(SwaggerConfig::new("My API", "1.0.0")))
///     .get("/users", list_users, RouteMetadata::new())
///     .into_router()
/// ```
pub struct SwaggerPlugin {
    config: SwaggerConfig,
}

impl SwaggerPlugin {
    /// Create a new Swagger plugin with the given configuration.
    pub fn new(config: SwaggerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SwaggerPlugin {
    fn install<S: Clone + Send + Sync + 'static>(self, app: ApiRouter<S>) -> ApiRouter<S> {
        tracing::info!(
            title = %self.config.info.title,
            version = %self.config.info.version,
            ui = !self.config.ui.disabled,
            "serving OpenAPI document at /swagger.json"
        );

        let source = Arc::new(app.table().clone());
        let handlers = swagger_handlers::<S>(self.config, source);

        let app = app.get("/swagger.json", handlers.document, RouteMetadata::hidden());
        match handlers.page {
            Some(page) => app.get("/swagger", page, RouteMetadata::hidden()),
            None => app,
        }
    }
}
