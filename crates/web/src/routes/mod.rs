//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Item list (requires auth)
//! GET  /health                 - Health check
//! GET  /about                  - About page
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Signup page
//! POST /auth/signup            - Signup action
//! POST /auth/logout            - Logout action
//!
//! # Items (require auth)
//! GET  /items/new              - New item form
//! POST /items                  - Create item
//! GET  /items/{id}/edit        - Edit item form
//! POST /items/{id}             - Update item
//! POST /items/{id}/delete      - Delete item
//! ```

pub mod auth;
pub mod items;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(items::create))
        .route("/new", get(items::new_item))
        .route("/{id}", post(items::update))
        .route("/{id}/edit", get(items::edit))
        .route("/{id}/delete", post(items::delete))
}

/// Create all routes for the app.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Item list is the home page
        .route("/", get(items::index))
        // About page
        .route("/about", get(pages::about))
        // Item routes
        .nest("/items", item_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
