use routedoc_core::meta::{QuerySchema, RequestBodyOptions, Route, RouteMetadata, SwaggerOptions};
use routedoc_core::pattern::{translate, RouteParam};
use serde_json::{json, Map, Value};

use crate::config::InfoConfig;
use crate::schema::{normalize_schema, schema_description};

/// Version string written to the `openapi` field of every document.
pub const OPENAPI_VERSION: &str = "3.0.3";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Empty overrides count as unset.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Build an OpenAPI 3.0.3 document from the `info` block and a route list.
///
/// Hidden routes are skipped. Each remaining route contributes one operation
/// per path template its pattern translates to. When two routes land on the
/// same template and method, the later one wins.
pub fn build_document(info: &InfoConfig, routes: &[Route]) -> Value {
    let mut paths: Map<String, Value> = Map::new();

    for route in routes {
        if route.is_hidden() {
            tracing::trace!(path = %route.path, "skipping hidden route");
            continue;
        }

        for variant in translate(&route.path) {
            let path_item = paths
                .entry(variant.template)
                .or_insert_with(|| json!({}));

            // Mount entries only make the path item exist.
            let Some(ref method) = route.method else {
                continue;
            };
            if let Some(obj) = path_item.as_object_mut() {
                obj.insert(method.to_lowercase(), build_operation(route, &variant.params));
            }
        }
    }

    tracing::debug!(routes = routes.len(), paths = paths.len(), "assembled OpenAPI document");

    json!({
        "openapi": OPENAPI_VERSION,
        "info": info,
        "paths": paths
    })
}

/// Build the operation object for one route on one path template.
///
/// `params` are the path parameters of that template. A method-less route
/// yields an empty object.
pub fn build_operation(route: &Route, params: &[RouteParam]) -> Value {
    if route.method.is_none() {
        return json!({});
    }

    let metadata = &route.metadata;
    let swagger = &metadata.swagger;

    let mut parameters: Vec<Value> = params
        .iter()
        .map(|p| path_parameter(metadata, p))
        .collect();
    if let Some(ref query) = metadata.query {
        parameters.extend(query_parameters(query));
    }

    let mut operation: Map<String, Value> = Map::new();

    if let Some(ref description) = swagger.description {
        operation.insert("description".into(), json!(description));
    }

    operation.insert("parameters".into(), Value::Array(parameters));

    if let Some(ref body) = metadata.body {
        operation.insert(
            "requestBody".into(),
            request_body(body, swagger.request_body.as_ref()),
        );
    }

    operation.insert("responses".into(), responses(metadata.response.as_ref(), swagger));

    if let Some(ref summary) = swagger.summary {
        operation.insert("summary".into(), json!(summary));
    }

    if let Some(ref tags) = swagger.tags {
        operation.insert("tags".into(), json!(tags));
    }

    Value::Object(operation)
}

/// Path parameters are always `required: true`; optionality is expressed by
/// the second path template instead.
fn path_parameter(metadata: &RouteMetadata, param: &RouteParam) -> Value {
    let mut obj: Map<String, Value> = Map::new();
    if let Some(description) = metadata.param_description(&param.name) {
        obj.insert("description".into(), json!(description));
    }
    obj.insert("in".into(), json!("path"));
    obj.insert("name".into(), json!(param.name));
    obj.insert("required".into(), json!(true));
    obj.insert("schema".into(), json!({ "type": "string" }));
    Value::Object(obj)
}

fn query_parameters(query: &QuerySchema) -> impl Iterator<Item = Value> + '_ {
    query.properties.iter().map(|(name, schema)| {
        let mut obj: Map<String, Value> = Map::new();
        if let Some(description) = schema_description(schema) {
            obj.insert("description".into(), json!(description));
        }
        obj.insert("in".into(), json!("query"));
        obj.insert("name".into(), json!(name));
        obj.insert("required".into(), json!(query.is_required(name)));
        obj.insert("schema".into(), normalize_schema(schema));
        Value::Object(obj)
    })
}

fn request_body(body: &Value, overrides: Option<&RequestBodyOptions>) -> Value {
    let content_type = non_empty(overrides.and_then(|o| o.content_type.as_deref()))
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let description = non_empty(overrides.and_then(|o| o.description.as_deref()))
        .or_else(|| non_empty(schema_description(body)));
    let required = overrides.and_then(|o| o.required).unwrap_or(true);

    let mut content: Map<String, Value> = Map::new();
    content.insert(content_type.to_string(), json!({ "schema": normalize_schema(body) }));

    let mut obj: Map<String, Value> = Map::new();
    obj.insert("content".into(), Value::Object(content));
    if let Some(description) = description {
        obj.insert("description".into(), json!(description));
    }
    obj.insert("required".into(), json!(required));
    Value::Object(obj)
}

/// The computed `200` response followed by the author's overrides, which
/// replace computed entries with the same status code wholesale.
fn responses(response: Option<&Value>, swagger: &SwaggerOptions) -> Value {
    let ok_override = swagger.responses.get("200");

    let content_type = non_empty(ok_override.and_then(|o| o.content_type.as_deref()))
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let schema = response
        .map(normalize_schema)
        .unwrap_or_else(|| json!({ "type": "object" }));
    let description = non_empty(ok_override.and_then(|o| o.description.as_deref()))
        .or_else(|| non_empty(response.and_then(schema_description)))
        .unwrap_or("");

    let mut content: Map<String, Value> = Map::new();
    content.insert(content_type.to_string(), json!({ "schema": schema }));

    let mut responses: Map<String, Value> = Map::new();
    responses.insert(
        "200".into(),
        json!({
            "content": content,
            "description": description
        }),
    );

    for (status, response) in &swagger.responses {
        responses.insert(status.clone(), response.to_json());
    }

    Value::Object(responses)
}
