//! Axum route handlers for the quote board RPC API.

use crate::db::Db;
use crate::remote;
use crate::store::{self, QuoteStore};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use quote_board_types::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct AppState {
    pub store: Mutex<QuoteStore>,
    pub db: Arc<Db>,
    pub start_time: Instant,
    pub last_sync_at: Mutex<Option<String>>,
    pub last_viewed: Mutex<Option<Quote>>,
    pub notification: Mutex<Option<String>>,
    pub sync_interval_secs: u64,
    pub sync_url: String,
    pub sync_limit: usize,
}

// =====================================================
// Quote Endpoints
// =====================================================

// POST /rpc/quotes/add
pub async fn quotes_add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddQuoteRequest>,
) -> (StatusCode, Json<RpcResponse<bool>>) {
    let mut store = state.store.lock().await;
    match store.append(Quote {
        text: req.text,
        category: req.category,
    }) {
        // added == false: the empty-field guard dropped the submission
        Ok(added) => (StatusCode::OK, Json(RpcResponse::ok(added))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Failed to add quote: {}", e))),
        ),
    }
}

// POST /rpc/quotes/random
pub async fn quotes_random(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RandomQuoteRequest>,
) -> (StatusCode, Json<RpcResponse<Option<Quote>>>) {
    let category = req
        .category
        .unwrap_or_else(|| store::ALL_CATEGORY.to_string());

    let picked = {
        let store = state.store.lock().await;
        let subset = store::filter_by_category(store.all(), &category);
        store::pick_quote(&subset, &mut rand::thread_rng()).cloned()
    };

    // Session-scoped last-viewed snapshot, overwritten on every render.
    if let Some(quote) = &picked {
        *state.last_viewed.lock().await = Some(quote.clone());
    }

    (StatusCode::OK, Json(RpcResponse::ok(picked)))
}

// GET /rpc/quotes/all
pub async fn quotes_all(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Vec<Quote>>>) {
    let store = state.store.lock().await;
    (StatusCode::OK, Json(RpcResponse::ok(store.all().to_vec())))
}

// GET /rpc/quotes/export
pub async fn quotes_export(State(state): State<Arc<AppState>>) -> Response {
    let store = state.store.lock().await;
    match serde_json::to_string(store.all()) {
        Ok(json) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"quotes.json\"",
                ),
            ],
            json,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::<bool>::err(format!("Export failed: {}", e))),
        )
            .into_response(),
    }
}

// POST /rpc/quotes/import — body is the bare JSON array from a quotes.json
// file; a body that does not parse fails the whole request with nothing
// applied.
pub async fn quotes_import(
    State(state): State<Arc<AppState>>,
    Json(quotes): Json<Vec<Quote>>,
) -> (StatusCode, Json<RpcResponse<usize>>) {
    let appended = {
        let mut store = state.store.lock().await;
        store.append_many(quotes)
    };

    match appended {
        Ok(count) => {
            *state.notification.lock().await = Some("Quotes imported successfully.".to_string());
            (StatusCode::OK, Json(RpcResponse::ok(count)))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Import failed: {}", e))),
        ),
    }
}

// =====================================================
// Category Endpoints
// =====================================================

// GET /rpc/categories
pub async fn categories_list(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Vec<String>>>) {
    let store = state.store.lock().await;
    (
        StatusCode::OK,
        Json(RpcResponse::ok(store::categories(store.all()))),
    )
}

// GET /rpc/categories/selected
pub async fn categories_selected(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<String>>) {
    match state.db.load_selected_category() {
        Ok(selected) => (
            StatusCode::OK,
            Json(RpcResponse::ok(
                selected.unwrap_or_else(|| store::ALL_CATEGORY.to_string()),
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Failed to load selection: {}", e))),
        ),
    }
}

// POST /rpc/categories/select
pub async fn categories_select(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectCategoryRequest>,
) -> (StatusCode, Json<RpcResponse<bool>>) {
    match state.db.save_selected_category(&req.category) {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(true))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Failed to save selection: {}", e))),
        ),
    }
}

// =====================================================
// Sync Endpoints
// =====================================================

// POST /rpc/sync/push — sends one quote to the remote write endpoint, which
// echoes it back without persisting anything.
pub async fn sync_push(
    State(state): State<Arc<AppState>>,
    Json(quote): Json<Quote>,
) -> (StatusCode, Json<RpcResponse<remote::PushedQuote>>) {
    let client = reqwest::Client::new();
    match remote::push_quote(&client, &state.sync_url, &quote).await {
        Ok(echo) => (StatusCode::OK, Json(RpcResponse::ok(echo))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Push failed: {}", e))),
        ),
    }
}

// =====================================================
// Service Endpoints
// =====================================================

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let (total_quotes, category_count) = {
        let store = state.store.lock().await;
        let categories = store::categories(store.all());
        (
            store.all().len() as i64,
            // The synthetic "all" entry is not a real category.
            (categories.len() - 1) as i64,
        )
    };

    let selected_category = state
        .db
        .load_selected_category()
        .ok()
        .flatten()
        .unwrap_or_else(|| store::ALL_CATEGORY.to_string());

    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_quotes,
        category_count,
        selected_category,
        sync_interval_secs: state.sync_interval_secs,
        last_sync_at: state.last_sync_at.lock().await.clone(),
        last_viewed: state.last_viewed.lock().await.clone(),
        notification: state.notification.lock().await.clone(),
    };

    (StatusCode::OK, Json(RpcResponse::ok(status)))
}
