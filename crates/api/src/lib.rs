pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/refresh", post(routes::auth::refresh))
        .route("/me", get(routes::auth::me));

    // Notification inbox of the authenticated user
    let user_routes = Router::new()
        .route("/notification", get(routes::user::list_notifications))
        .route("/notification/seen", put(routes::user::mark_all_seen))
        .route("/notification", delete(routes::user::clear_all));

    let doctor_routes = Router::new()
        .route("/", get(routes::doctor::list_approved))
        .route("/apply", post(routes::doctor::apply))
        .route("/me", get(routes::doctor::me))
        .route("/me", put(routes::doctor::update_me))
        .route("/me/appointment", get(routes::doctor::my_appointments))
        .route("/{doctor_id}", get(routes::doctor::get));

    let appointment_routes = Router::new()
        .route("/", post(routes::appointment::book))
        .route("/", get(routes::appointment::list_mine))
        .route("/availability", post(routes::appointment::check_availability))
        .route(
            "/{appointment_id}/status",
            put(routes::appointment::set_status),
        );

    let admin_routes = Router::new()
        .route("/user", get(routes::admin::list_users))
        .route("/doctor", get(routes::admin::list_doctors))
        .route(
            "/doctor/{doctor_id}/status",
            put(routes::admin::decide_doctor),
        );

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/user", user_routes)
        .nest("/doctor", doctor_routes)
        .nest("/appointment", appointment_routes)
        .nest("/admin", admin_routes);

    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
