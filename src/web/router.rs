//! Router configuration for the villadesk HTTP surface.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{
    auth_status, change_password, create_property, delete_property, get_property, list_properties,
    login, login_page, logout, submit_contact, update_property, AppState,
};
use super::middleware::{admin_guard, resolve_session};

/// Create the main application router.
///
/// Mutating property routes and the admin panel assets sit behind the admin
/// guard; listings, the contact form and the public site stay open. The
/// session middleware runs on every request so handlers and the guard share
/// one resolution.
pub fn create_router(state: Arc<AppState>) -> Router {
    let guard = |state: &Arc<AppState>| middleware::from_fn_with_state(state.clone(), admin_guard);

    let api = Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/auth/status", get(auth_status))
        .route(
            "/api/auth/change-password",
            post(change_password).route_layer(guard(&state)),
        )
        .route(
            "/api/properties",
            get(list_properties).merge(post(create_property).route_layer(guard(&state))),
        )
        .route(
            "/api/properties/:id",
            get(get_property).merge(
                put(update_property)
                    .delete(delete_property)
                    .route_layer(guard(&state)),
            ),
        )
        .route("/contact", post(submit_contact));

    // Admin panel assets, behind the guard. The login page has its own
    // session-aware route that wins over the nested wildcard.
    let admin_assets = Router::new()
        .nest_service("/admin", ServeDir::new(state.admin_path()))
        .route_layer(guard(&state));

    Router::new()
        .merge(api)
        .route("/admin/login.html", get(login_page))
        .merge(admin_assets)
        .nest_service("/uploads", ServeDir::new(state.images.uploads_dir()))
        .fallback_service(ServeDir::new(state.site_path()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    resolve_session,
                )),
        )
        .with_state(state)
}
