use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin};
use crate::state::AppState;

/// The complete routing table
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .merge(public_routes())
        // Any authenticated role
        .merge(user_routes(state.clone()))
        // Admin only
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health))
        .route("/register", post(public::register))
        .route("/login", post(public::login))
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/data", get(protected::data::list))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::admin;

    // Layers run bottom-up: authenticate first, then check the role.
    Router::new()
        .route(
            "/admin/data",
            get(protected::data::list).post(admin::data_create),
        )
        .route(
            "/admin/data/:id",
            put(admin::data_update).delete(admin::data_delete),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
