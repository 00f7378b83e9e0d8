use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::table::RouterId;

/// A single entry of the route table.
///
/// A route without a `method` is a mount point (a sub-router registration)
/// rather than a terminal handler.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Option<String>,
    pub path: String,
    pub metadata: RouteMetadata,
    pub owner: RouterId,
}

impl Route {
    /// Create a terminal route owned by the root router.
    pub fn new(method: &str, path: &str, metadata: RouteMetadata) -> Self {
        Self {
            method: Some(method.to_string()),
            path: path.to_string(),
            metadata,
            owner: RouterId::ROOT,
        }
    }

    /// Create a method-less mount entry owned by the root router.
    pub fn mount(path: &str, metadata: RouteMetadata) -> Self {
        Self {
            method: None,
            path: path.to_string(),
            metadata,
            owner: RouterId::ROOT,
        }
    }

    pub fn with_owner(mut self, owner: RouterId) -> Self {
        self.owner = owner;
        self
    }

    /// Whether the author excluded this route from generated documentation.
    pub fn is_hidden(&self) -> bool {
        self.metadata.swagger.hidden
    }
}

/// Author-declared metadata attached to a route. Every field is optional.
///
/// Schemas are JSON-Schema-shaped [`Value`]s and are never validated; only
/// their `description` and `properties` keys are ever read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteMetadata {
    /// Schema describing path parameters, keyed under `properties`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QuerySchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    pub swagger: SwaggerOptions,
}

impl RouteMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a route that never appears in generated documents.
    pub fn hidden() -> Self {
        Self::new().with_swagger(SwaggerOptions::new().hidden(true))
    }

    pub fn with_params(mut self, schema: Value) -> Self {
        self.params = Some(schema);
        self
    }

    pub fn with_query(mut self, query: QuerySchema) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, schema: Value) -> Self {
        self.body = Some(schema);
        self
    }

    pub fn with_response(mut self, schema: Value) -> Self {
        self.response = Some(schema);
        self
    }

    pub fn with_swagger(mut self, swagger: SwaggerOptions) -> Self {
        self.swagger = swagger;
        self
    }

    /// Description of a path parameter, read from `params.properties[name]`.
    pub fn param_description(&self, name: &str) -> Option<&str> {
        self.params
            .as_ref()?
            .get("properties")?
            .get(name)?
            .get("description")?
            .as_str()
    }
}

/// Query-string schema: a set of named properties, some of them required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySchema {
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl QuerySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an optional property. Insertion order is kept in the document.
    pub fn property(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    /// Add a property and mark it as required.
    pub fn required_property(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Documentation overrides for a single route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwaggerOptions {
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOptions>,
    /// Response overrides keyed by status code (`"200"`, `"404"`, ...).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, ResponseOverride>,
}

impl SwaggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.to_string());
        self
    }

    pub fn request_body(mut self, request_body: RequestBodyOptions) -> Self {
        self.request_body = Some(request_body);
        self
    }

    /// Register a response override. A later call for the same status wins.
    pub fn response(mut self, status: u16, response: ResponseOverride) -> Self {
        self.responses.insert(status.to_string(), response);
        self
    }
}

/// Overrides for the generated `requestBody` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBodyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RequestBodyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// An author-supplied response object.
///
/// Serialized verbatim into the document: any key the author sets, known or
/// not, is written back exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// The override as a JSON response object, keys in declaration order
    /// followed by any extra keys.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if let Some(ref content) = self.content {
            obj.insert("content".into(), content.clone());
        }
        if let Some(ref content_type) = self.content_type {
            obj.insert("contentType".into(), Value::String(content_type.clone()));
        }
        if let Some(ref description) = self.description {
            obj.insert("description".into(), Value::String(description.clone()));
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }

    /// Set `content[content_type].schema`.
    pub fn with_schema(mut self, content_type: &str, schema: Value) -> Self {
        let mut content = match self.content.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        content.insert(content_type.to_string(), serde_json::json!({ "schema": schema }));
        self.content = Some(Value::Object(content));
        self
    }
}
