use routedoc_core::meta::{
    QuerySchema, RequestBodyOptions, ResponseOverride, Route, RouteMetadata, SwaggerOptions,
};
use routedoc_core::pattern::RouteParam;
use routedoc_openapi::{build_document, build_operation, normalize_schema, InfoConfig, SwaggerConfig};
use serde_json::{json, Value};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn info() -> InfoConfig {
    SwaggerConfig::new("Test API", "0.1.0").info
}

fn route(method: &str, path: &str) -> Route {
    Route::new(method, path, RouteMetadata::new())
}

fn with_meta(method: &str, path: &str, metadata: RouteMetadata) -> Route {
    Route::new(method, path, metadata)
}

fn paths(doc: &Value) -> Vec<String> {
    doc["paths"].as_object().unwrap().keys().cloned().collect()
}

// ── Document root ───────────────────────────────────────────────────────────

#[test]
fn empty_document() {
    let doc = build_document(&info(), &[]);
    assert_eq!(doc["openapi"], "3.0.3");
    assert_eq!(doc["info"], json!({ "title": "Test API", "version": "0.1.0" }));
    assert!(doc["paths"].as_object().unwrap().is_empty());
}

#[test]
fn info_description_is_copied() {
    let info = SwaggerConfig::new("API", "2.0.0").with_description("A test API").info;
    let doc = build_document(&info, &[]);
    assert_eq!(doc["info"]["description"], "A test API");
}

// ── Paths ───────────────────────────────────────────────────────────────────

#[test]
fn static_route_produces_one_path() {
    let doc = build_document(&info(), &[route("GET", "/health")]);
    assert_eq!(paths(&doc), vec!["/health"]);
    assert!(doc["paths"]["/health"]["get"].is_object());
}

#[test]
fn method_is_lowercased() {
    let doc = build_document(&info(), &[route("PATCH", "/things")]);
    assert!(doc["paths"]["/things"]["patch"].is_object());
    assert!(doc["paths"]["/things"].get("PATCH").is_none());
}

#[test]
fn optional_param_produces_two_paths() {
    let doc = build_document(&info(), &[route("GET", "/users/:id?")]);
    assert_eq!(paths(&doc), vec!["/users", "/users/{id}"]);

    assert_eq!(doc["paths"]["/users"]["get"]["parameters"], json!([]));
    let params = doc["paths"]["/users/{id}"]["get"]["parameters"].as_array().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(
        params[0],
        json!({ "in": "path", "name": "id", "required": true, "schema": { "type": "string" } })
    );
}

#[test]
fn path_param_description_from_params_schema() {
    let metadata = RouteMetadata::new().with_params(json!({
        "type": "object",
        "properties": { "id": { "type": "string", "description": "User id" } }
    }));
    let doc = build_document(&info(), &[with_meta("GET", "/users/:id", metadata)]);
    let param = &doc["paths"]["/users/{id}"]["get"]["parameters"][0];
    assert_eq!(param["description"], "User id");
    assert_eq!(param["schema"], json!({ "type": "string" }));
}

#[test]
fn hidden_route_is_not_documented() {
    let doc = build_document(
        &info(),
        &[
            with_meta("GET", "/secret/:id?", RouteMetadata::hidden()),
            route("GET", "/public"),
        ],
    );
    assert_eq!(paths(&doc), vec!["/public"]);
}

#[test]
fn mount_route_creates_empty_path_item() {
    let doc = build_document(&info(), &[Route::mount("/api", RouteMetadata::new())]);
    assert_eq!(doc["paths"]["/api"], json!({}));
}

#[test]
fn mount_route_does_not_clear_existing_operations() {
    let doc = build_document(
        &info(),
        &[route("GET", "/api"), Route::mount("/api", RouteMetadata::new())],
    );
    assert!(doc["paths"]["/api"]["get"].is_object());
}

#[test]
fn methods_share_a_path_item() {
    let doc = build_document(&info(), &[route("GET", "/users"), route("POST", "/users")]);
    let item = doc["paths"]["/users"].as_object().unwrap();
    assert_eq!(item.keys().collect::<Vec<_>>(), vec!["get", "post"]);
}

#[test]
fn later_route_wins_on_collision() {
    let first = with_meta("GET", "/users", RouteMetadata::new().with_swagger(SwaggerOptions::new().summary("first")));
    let second = with_meta("GET", "/users/:id?", RouteMetadata::new().with_swagger(SwaggerOptions::new().summary("second")));
    let doc = build_document(&info(), &[first, second]);
    assert_eq!(doc["paths"]["/users"]["get"]["summary"], "second");
}

// ── Query parameters ────────────────────────────────────────────────────────

#[test]
fn required_query_param() {
    let query = QuerySchema::new().required_property("q", json!({ "type": "string" }));
    let doc = build_document(&info(), &[with_meta("GET", "/search", RouteMetadata::new().with_query(query))]);
    assert_eq!(
        doc["paths"]["/search"]["get"]["parameters"],
        json!([{ "in": "query", "name": "q", "required": true, "schema": { "type": "string" } }])
    );
}

#[test]
fn query_description_is_promoted_out_of_schema() {
    let query = QuerySchema::new()
        .property("page", json!({ "type": "integer", "description": "Page number", "minimum": 1 }));
    let doc = build_document(&info(), &[with_meta("GET", "/items", RouteMetadata::new().with_query(query))]);
    let param = &doc["paths"]["/items"]["get"]["parameters"][0];
    assert_eq!(param["description"], "Page number");
    assert_eq!(param["required"], false);
    assert_eq!(param["schema"], json!({ "type": "integer", "minimum": 1 }));
}

#[test]
fn query_schema_from_json() {
    let query: QuerySchema = serde_json::from_value(json!({
        "properties": { "q": { "type": "string" }, "limit": { "type": "integer" } },
        "required": ["q"]
    }))
    .unwrap();
    let doc = build_document(&info(), &[with_meta("GET", "/s", RouteMetadata::new().with_query(query))]);
    let params = doc["paths"]["/s"]["get"]["parameters"].as_array().unwrap();
    assert_eq!(params[0]["name"], "q");
    assert_eq!(params[0]["required"], true);
    assert_eq!(params[1]["name"], "limit");
    assert_eq!(params[1]["required"], false);
}

#[test]
fn path_params_precede_query_params() {
    let query = QuerySchema::new().property("expand", json!({ "type": "boolean" }));
    let doc = build_document(&info(), &[with_meta("GET", "/users/:id", RouteMetadata::new().with_query(query))]);
    let params = doc["paths"]["/users/{id}"]["get"]["parameters"].as_array().unwrap();
    assert_eq!(params[0]["in"], "path");
    assert_eq!(params[1]["in"], "query");
}

// ── Operation fields ────────────────────────────────────────────────────────

#[test]
fn swagger_overrides_are_copied() {
    let swagger = SwaggerOptions::new()
        .summary("List users")
        .description("Returns every user")
        .tag("users")
        .tag("admin");
    let doc = build_document(&info(), &[with_meta("GET", "/users", RouteMetadata::new().with_swagger(swagger))]);
    let op = &doc["paths"]["/users"]["get"];
    assert_eq!(op["summary"], "List users");
    assert_eq!(op["description"], "Returns every user");
    assert_eq!(op["tags"], json!(["users", "admin"]));
}

#[test]
fn absent_overrides_are_omitted() {
    let doc = build_document(&info(), &[route("GET", "/users")]);
    let op = doc["paths"]["/users"]["get"].as_object().unwrap();
    assert_eq!(op.keys().collect::<Vec<_>>(), vec!["parameters", "responses"]);
}

// ── Request body ────────────────────────────────────────────────────────────

#[test]
fn request_body_defaults() {
    let body = json!({ "type": "object", "description": "New user", "properties": { "name": { "type": "string" } } });
    let doc = build_document(&info(), &[with_meta("POST", "/users", RouteMetadata::new().with_body(body))]);
    assert_eq!(
        doc["paths"]["/users"]["post"]["requestBody"],
        json!({
            "content": {
                "application/json": {
                    "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                }
            },
            "description": "New user",
            "required": true
        })
    );
}

#[test]
fn request_body_overrides() {
    let metadata = RouteMetadata::new()
        .with_body(json!({ "type": "string", "description": "schema text" }))
        .with_swagger(SwaggerOptions::new().request_body(
            RequestBodyOptions::new()
                .with_content_type("text/plain")
                .with_description("Raw text")
                .with_required(false),
        ));
    let doc = build_document(&info(), &[with_meta("PUT", "/notes/:id", metadata)]);
    let body = &doc["paths"]["/notes/{id}"]["put"]["requestBody"];
    assert_eq!(body["content"]["text/plain"]["schema"], json!({ "type": "string" }));
    assert!(body["content"].get("application/json").is_none());
    assert_eq!(body["description"], "Raw text");
    assert_eq!(body["required"], false);
}

#[test]
fn request_body_overrides_without_body_are_ignored() {
    let metadata = RouteMetadata::new()
        .with_swagger(SwaggerOptions::new().request_body(RequestBodyOptions::new().with_required(false)));
    let doc = build_document(&info(), &[with_meta("POST", "/ping", metadata)]);
    assert!(doc["paths"]["/ping"]["post"].get("requestBody").is_none());
}

#[test]
fn empty_request_body_content_type_falls_back() {
    let metadata = RouteMetadata::new()
        .with_body(json!({ "type": "object" }))
        .with_swagger(SwaggerOptions::new().request_body(RequestBodyOptions::new().with_content_type("")));
    let doc = build_document(&info(), &[with_meta("POST", "/x", metadata)]);
    assert!(doc["paths"]["/x"]["post"]["requestBody"]["content"]["application/json"].is_object());
    assert!(doc["paths"]["/x"]["post"]["requestBody"].get("description").is_none());
}

// ── Responses ───────────────────────────────────────────────────────────────

#[test]
fn default_response_without_schema() {
    let doc = build_document(&info(), &[route("GET", "/users")]);
    assert_eq!(
        doc["paths"]["/users"]["get"]["responses"],
        json!({
            "200": {
                "content": { "application/json": { "schema": { "type": "object" } } },
                "description": ""
            }
        })
    );
}

#[test]
fn default_response_uses_normalized_schema() {
    let response = json!({ "type": "array", "description": "All users", "items": { "type": "string" } });
    let doc = build_document(&info(), &[with_meta("GET", "/users", RouteMetadata::new().with_response(response))]);
    let ok = &doc["paths"]["/users"]["get"]["responses"]["200"];
    assert_eq!(
        ok["content"]["application/json"]["schema"],
        json!({ "type": "array", "items": { "type": "string" } })
    );
    assert_eq!(ok["description"], "All users");
}

#[test]
fn extra_status_codes_are_merged_verbatim() {
    let not_found = ResponseOverride::new()
        .with_description("No such user")
        .with_schema("application/json", json!({ "type": "object" }));
    let metadata = RouteMetadata::new()
        .with_response(json!({ "type": "object" }))
        .with_swagger(SwaggerOptions::new().response(404, not_found));
    let doc = build_document(&info(), &[with_meta("GET", "/users/:id", metadata)]);
    let responses = doc["paths"]["/users/{id}"]["get"]["responses"].as_object().unwrap();

    assert_eq!(responses.keys().collect::<Vec<_>>(), vec!["200", "404"]);
    assert_eq!(
        responses["404"],
        json!({
            "content": { "application/json": { "schema": { "type": "object" } } },
            "description": "No such user"
        })
    );
    assert_eq!(
        responses["200"]["content"]["application/json"]["schema"],
        json!({ "type": "object" })
    );
}

#[test]
fn ok_override_replaces_computed_entry() {
    let ok = ResponseOverride::new()
        .with_content_type("text/plain")
        .with_description("Plain text");
    let metadata = RouteMetadata::new()
        .with_response(json!({ "type": "string" }))
        .with_swagger(SwaggerOptions::new().response(200, ok));
    let doc = build_document(&info(), &[with_meta("GET", "/text", metadata)]);
    assert_eq!(
        doc["paths"]["/text"]["get"]["responses"]["200"],
        json!({ "contentType": "text/plain", "description": "Plain text" })
    );
}

#[test]
fn response_override_extra_keys_survive() {
    let override_json = json!({ "description": "Gone", "headers": { "X-Reason": { "schema": { "type": "string" } } } });
    let gone: ResponseOverride = serde_json::from_value(override_json.clone()).unwrap();
    let metadata = RouteMetadata::new().with_swagger(SwaggerOptions::new().response(410, gone));
    let doc = build_document(&info(), &[with_meta("DELETE", "/old", metadata)]);
    assert_eq!(doc["paths"]["/old"]["delete"]["responses"]["410"], override_json);
}

// ── build_operation ─────────────────────────────────────────────────────────

#[test]
fn operation_for_mount_route_is_empty() {
    let mount = Route::mount("/api/:version", RouteMetadata::new());
    assert_eq!(build_operation(&mount, &[RouteParam::required("version")]), json!({}));
}

#[test]
fn operation_uses_given_params() {
    let op = build_operation(&route("GET", "/a/:x?"), &[RouteParam::optional("x")]);
    assert_eq!(op["parameters"][0]["name"], "x");
    assert_eq!(op["parameters"][0]["required"], true);
}

// ── Schema normalization ────────────────────────────────────────────────────

#[test]
fn normalize_strips_only_top_level_description() {
    let schema = json!({
        "type": "object",
        "description": "outer",
        "properties": { "a": { "type": "string", "description": "inner" } }
    });
    assert_eq!(
        normalize_schema(&schema),
        json!({ "type": "object", "properties": { "a": { "type": "string", "description": "inner" } } })
    );
}

#[test]
fn normalize_leaves_non_objects_alone() {
    assert_eq!(normalize_schema(&json!(true)), json!(true));
    assert_eq!(normalize_schema(&Value::Null), Value::Null);
}

// ── Properties ──────────────────────────────────────────────────────────────

#[test]
fn assembly_is_idempotent() {
    let routes = vec![
        route("GET", "/users/:id?"),
        with_meta("POST", "/users", RouteMetadata::new().with_body(json!({ "type": "object" }))),
        Route::mount("/admin", RouteMetadata::new()),
    ];
    assert_eq!(build_document(&info(), &routes), build_document(&info(), &routes));
}

#[test]
fn adding_a_route_only_adds_its_paths() {
    let mut routes = vec![route("GET", "/users/:id?"), route("GET", "/health")];
    let before = build_document(&info(), &routes);

    routes.push(route("GET", "/orders/:id"));
    let after = build_document(&info(), &routes);

    assert!(before["paths"].get("/orders/{id}").is_none());
    assert!(after["paths"]["/orders/{id}"]["get"].is_object());
    for path in paths(&before) {
        assert_eq!(before["paths"][&path], after["paths"][&path]);
    }
}
