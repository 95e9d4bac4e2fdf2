use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod store;
pub mod validation;

use handlers::AppState;
use store::Store;

/// Builds the HTTP application around an already opened store.
pub fn app(store: Store) -> Router {
    handlers::router()
        .with_state(AppState { store })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
