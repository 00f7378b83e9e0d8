//! Core building blocks for routedoc.
//!
//! - [`meta`]: the per-route metadata authors attach to a handler.
//! - [`table`]: the shared, append-only route table read by documentation
//!   generators.
//! - [`pattern`]: translation of `:param` / `:param?` route patterns into
//!   OpenAPI path templates.
//! - [`router`]: an axum router that records metadata while mounting handlers.

pub mod layers;
pub mod meta;
pub mod pattern;
pub mod plugin;
pub mod router;
pub mod table;

pub use layers::{default_trace, init_tracing};
pub use meta::{QuerySchema, RequestBodyOptions, ResponseOverride, Route, RouteMetadata, SwaggerOptions};
pub use pattern::{translate, PathVariant, RouteParam};
pub use plugin::Plugin;
pub use router::ApiRouter;
pub use table::{RouteScope, RouteSource, RouteTable, RouterId};
