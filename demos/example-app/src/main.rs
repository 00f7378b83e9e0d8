use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use routedoc_core::meta::{QuerySchema, ResponseOverride, RouteMetadata, SwaggerOptions};
use routedoc_core::{default_trace, init_tracing, ApiRouter};
use routedoc_openapi::{SwaggerConfig, SwaggerPlugin};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
struct Pet {
    id: u64,
    name: String,
    species: String,
}

#[derive(Debug, Deserialize)]
struct NewPet {
    name: String,
    species: String,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    species: Option<String>,
}

#[derive(Clone, Default)]
struct AppState {
    pets: Arc<RwLock<Vec<Pet>>>,
    next_id: Arc<AtomicU64>,
}

fn pet_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "description": "A pet",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "species": { "type": "string" }
        }
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Pet not found" }))).into_response()
}

async fn list_or_get(
    State(state): State<AppState>,
    id: Option<Path<u64>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let pets = state.pets.read().await;
    match id {
        Some(Path(id)) => match pets.iter().find(|p| p.id == id) {
            Some(pet) => Json(pet.clone()).into_response(),
            None => not_found(),
        },
        None => {
            let listed: Vec<Pet> = pets
                .iter()
                .filter(|p| query.species.as_deref().map_or(true, |s| p.species == s))
                .cloned()
                .collect();
            Json(listed).into_response()
        }
    }
}

async fn create_pet(State(state): State<AppState>, Json(new): Json<NewPet>) -> Json<Pet> {
    let pet = Pet {
        id: state.next_id.fetch_add(1, Ordering::Relaxed) + 1,
        name: new.name,
        species: new.species,
    };
    state.pets.write().await.push(pet.clone());
    tracing::info!(id = pet.id, name = %pet.name, "pet created");
    Json(pet)
}

async fn delete_pet(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut pets = state.pets.write().await;
    let before = pets.len();
    pets.retain(|p| p.id != id);
    if pets.len() == before {
        not_found()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let count = state.pets.read().await.len();
    Json(json!({ "pets": count }))
}

fn admin_routes() -> ApiRouter<AppState> {
    ApiRouter::new().get(
        "/stats",
        stats,
        RouteMetadata::new()
            .with_response(json!({ "type": "object", "properties": { "pets": { "type": "integer" } } }))
            .with_swagger(SwaggerOptions::new().summary("Store statistics").tag("admin")),
    )
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = SwaggerConfig::load("application.yaml").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to built-in documentation config");
        SwaggerConfig::new("Pet Store", env!("CARGO_PKG_VERSION"))
    });

    let app = ApiRouter::new()
        .with(SwaggerPlugin::new(config))
        .get(
            r"/pets/:id(\d+)?",
            list_or_get,
            RouteMetadata::new()
                .with_params(json!({ "properties": { "id": { "description": "Pet id" } } }))
                .with_query(QuerySchema::new().property(
                    "species",
                    json!({ "type": "string", "description": "Only list pets of this species" }),
                ))
                .with_response(pet_schema())
                .with_swagger(
                    SwaggerOptions::new()
                        .summary("List pets, or fetch one by id")
                        .tag("pets")
                        .response(404, ResponseOverride::new().with_description("Pet not found")),
                ),
        )
        .post(
            "/pets",
            create_pet,
            RouteMetadata::new()
                .with_body(json!({
                    "type": "object",
                    "description": "The pet to add",
                    "properties": { "name": { "type": "string" }, "species": { "type": "string" } }
                }))
                .with_response(pet_schema())
                .with_swagger(SwaggerOptions::new().summary("Add a pet").tag("pets")),
        )
        .delete(
            "/pets/:id",
            delete_pet,
            RouteMetadata::new().with_swagger(
                SwaggerOptions::new()
                    .summary("Remove a pet")
                    .tag("pets")
                    .response(204, ResponseOverride::new().with_description("Removed")),
            ),
        )
        .mount("/admin", admin_routes())
        .layer(default_trace())
        .into_router()
        .with_state(AppState::default());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on http://localhost:3000 (docs at /swagger)");
    axum::serve(listener, app).await
}
