pub mod device;
pub mod docs;
pub mod health;
pub mod me;
pub mod oauth;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::auth::require_user, AppState};

/// Full application router. Everything under `/v1/me` goes through the
/// bearer check first.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/me", get(me::get_me))
        .route("/v1/me/devices", get(me::get_my_devices))
        .route_layer(from_fn_with_state(state.clone(), require_user));

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/v1.1/devices/:dongle_id", get(device::get_device))
        .route("/auth/login/:provider", get(oauth::login))
        .route("/auth/callback/:provider", get(oauth::callback));

    protected
        .merge(public)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
