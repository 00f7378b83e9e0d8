use std::sync::Arc;

use axum::handler::Handler;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use routedoc_core::table::RouteSource;

use crate::builder::build_document;
use crate::config::SwaggerConfig;
use crate::ui::render_ui;

struct SwaggerState {
    config: SwaggerConfig,
    source: Arc<dyn RouteSource>,
}

/// Handlers for `/swagger.json` and, unless the UI is disabled, `/swagger`.
pub(crate) struct SwaggerHandlers<D, P> {
    pub(crate) document: D,
    pub(crate) page: Option<P>,
}

pub(crate) fn swagger_handlers<S: Clone + Send + Sync + 'static>(
    config: SwaggerConfig,
    source: Arc<dyn RouteSource>,
) -> SwaggerHandlers<impl Handler<((),), S>, impl Handler<((),), S>> {
    let page = (!config.ui.disabled).then(|| Arc::new(render_ui(&config)));
    let state = Arc::new(SwaggerState { config, source });

    let document = move || {
        let state = state.clone();
        async move {
            let routes = state.source.routes();
            Json(build_document(&state.config.info, &routes))
        }
    };
    let page = page.map(|page| {
        move || {
            let page = page.clone();
            async move { ([(CONTENT_TYPE, "text/html; charset=utf8")], page.to_string()).into_response() }
        }
    });

    SwaggerHandlers { document, page }
}

/// Build an `axum::Router` that serves `/swagger.json` and optionally `/swagger`.
///
/// The document is rebuilt from `source` on every request, so routes
/// registered after this router was created are included.
pub fn swagger_routes<S: Clone + Send + Sync + 'static>(
    config: SwaggerConfig,
    source: Arc<dyn RouteSource>,
) -> Router<S> {
    let handlers = swagger_handlers::<S>(config, source);

    let mut router = Router::<S>::new().route("/swagger.json", get(handlers.document));
    if let Some(page) = handlers.page {
        router = router.route("/swagger", get(page));
    }
    router
}
