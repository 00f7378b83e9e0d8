mod builder;
mod config;
mod ext;
mod handlers;
pub mod schema;
mod ui;

pub use builder::{build_document, build_operation, OPENAPI_VERSION};
pub use config::{ConfigError, InfoConfig, SwaggerConfig, Theme, UiConfig, DEFAULT_UI_VERSION};
pub use ext::SwaggerPlugin;
pub use handlers::swagger_routes;
pub use schema::normalize_schema;
pub use ui::render_ui;
