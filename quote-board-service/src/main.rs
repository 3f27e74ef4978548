//! Quote Board Service — standalone binary for storing and serving quotes.
//!
//! Hosts both an RPC API and a dashboard UI on the same port, and keeps the
//! collection synced against a placeholder REST endpoint in the background.
//! Default: http://127.0.0.1:9103/

mod dashboard;
mod db;
mod remote;
mod routes;
mod store;
mod worker;

use routes::AppState;
use std::sync::Arc;
use std::time::Instant;
use store::QuoteStore;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let port: u16 = std::env::var("QUOTE_BOARD_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9103);

    let db_path = std::env::var("QUOTE_BOARD_DB_PATH")
        .unwrap_or_else(|_| "./quote_board.db".to_string());

    let sync_interval_secs: u64 = std::env::var("QUOTE_BOARD_SYNC_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);

    let sync_url = std::env::var("QUOTE_BOARD_SYNC_URL")
        .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com/posts".to_string());

    let sync_limit: usize = std::env::var("QUOTE_BOARD_SYNC_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    log::info!("Opening database at: {}", db_path);
    let database = Arc::new(db::Db::open(&db_path).expect("Failed to open database"));

    let store = match QuoteStore::load(database.clone()) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Could not load saved quotes ({}), starting from defaults", e);
            QuoteStore::seeded(database.clone())
        }
    };
    log::info!("Loaded {} quotes", store.all().len());

    let state = Arc::new(AppState {
        store: Mutex::new(store),
        db: database,
        start_time: Instant::now(),
        last_sync_at: Mutex::new(None),
        last_viewed: Mutex::new(None),
        notification: Mutex::new(None),
        sync_interval_secs,
        sync_url,
        sync_limit,
    });

    // Spawn the background sync worker unless the interval disables it
    if sync_interval_secs > 0 {
        let worker_state = state.clone();
        tokio::spawn(async move {
            worker::run_worker(worker_state).await;
        });
    } else {
        log::warn!("QUOTE_BOARD_SYNC_INTERVAL is 0 — background sync disabled");
    }

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = axum::Router::new()
        .route("/", axum::routing::get(dashboard::dashboard))
        // Quotes
        .route("/rpc/quotes/add", axum::routing::post(routes::quotes_add))
        .route(
            "/rpc/quotes/random",
            axum::routing::post(routes::quotes_random),
        )
        .route("/rpc/quotes/all", axum::routing::get(routes::quotes_all))
        .route(
            "/rpc/quotes/export",
            axum::routing::get(routes::quotes_export),
        )
        .route(
            "/rpc/quotes/import",
            axum::routing::post(routes::quotes_import),
        )
        // Categories
        .route(
            "/rpc/categories",
            axum::routing::get(routes::categories_list),
        )
        .route(
            "/rpc/categories/selected",
            axum::routing::get(routes::categories_selected),
        )
        .route(
            "/rpc/categories/select",
            axum::routing::post(routes::categories_select),
        )
        // Sync
        .route("/rpc/sync/push", axum::routing::post(routes::sync_push))
        // Service
        .route("/rpc/status", axum::routing::get(routes::status))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", port);
    log::info!("Quote Board Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
