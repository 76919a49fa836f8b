// Fair Split - Web Server
// JSON API plus the browser form, sharing one controller

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use fair_split::{Controller, Field, MemoryStore, SqliteStore, StateStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    controller: Arc<Mutex<Controller>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Body of POST /api/edit: one edit's worth of raw field text
#[derive(Deserialize)]
struct EditRequest {
    field: Field,
    raw: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/state - Current view (inputs echoed + computed shares)
async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().unwrap();

    (StatusCode::OK, Json(ApiResponse::ok(controller.view()))).into_response()
}

/// POST /api/edit - Run one edit through the pipeline, return the new view
async fn edit_field(
    State(state): State<AppState>,
    Json(edit): Json<EditRequest>,
) -> impl IntoResponse {
    let mut controller = state.controller.lock().unwrap();

    let view = controller.on_field_edit(edit.field, &edit.raw);

    (StatusCode::OK, Json(ApiResponse::ok(view))).into_response()
}

/// GET / - Serve the calculator form
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Fair Split - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Open durable storage; fall back to session-only if unavailable
    let controller = Controller::new(open_store());

    // Create shared state
    let state = AppState {
        controller: Arc::new(Mutex::new(controller)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/state", get(get_state))
        .route("/edit", post(edit_field))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = std::env::var("FAIR_SPLIT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/state", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

fn open_store() -> Box<dyn StateStore> {
    let path = std::env::var("FAIR_SPLIT_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("fair-split.db"));

    match SqliteStore::open(&path) {
        Ok(store) => {
            println!("✓ State database: {}", path.display());
            Box::new(store)
        }
        Err(err) => {
            eprintln!("❌ Could not open {}: {}", path.display(), err);
            eprintln!("   Continuing without persistence (session only).");
            Box::new(MemoryStore::new())
        }
    }
}
