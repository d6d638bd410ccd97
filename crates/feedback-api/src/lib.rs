pub mod auth;
pub mod error;
pub mod feedback;
pub mod pages;
pub mod password;
pub mod session;
pub mod users;

use std::sync::Arc;

use axum::{Router, routing::get};

use feedback_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
}

/// Full route table. Responses are rendered pages or 3xx redirects; there
/// is no JSON surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(users::index))
        .route("/home", get(users::home))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/users/{username}", get(users::profile))
        .route("/users/{username}/delete", get(users::delete_user))
        .route(
            "/users/{username}/feedback/add",
            get(feedback::add_form).post(feedback::add),
        )
        .route(
            "/feedback/{id}/update",
            get(feedback::update_form).post(feedback::update),
        )
        .route("/feedback/{id}/delete", get(feedback::delete))
        .with_state(state)
}
