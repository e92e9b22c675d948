//! Authentication route handlers.
//!
//! Handles login, registration, and logout. Feedback is carried across the
//! redirect as short query-string codes and rendered as flash messages by
//! the page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

/// Map a login flash code to a user-visible message.
fn login_flash(code: &str) -> String {
    match code {
        "credentials" => "Invalid username or password",
        "session" => "Could not establish a session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

/// Map a signup flash code to a user-visible message.
fn signup_flash(code: &str) -> String {
    match code {
        "username_taken" => "Username already exists. Please choose a different one.",
        "invalid_username" => "That username cannot be used.",
        _ => "Registration failed. Please try again.",
    }
    .to_string()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(login_flash),
        success: query
            .success
            .map(|_| "Registration successful. Please log in.".to_string()),
    }
}

/// Handle login form submission.
///
/// Verifies the credentials and, on success, binds the resolved identity to
/// a fresh session id. On failure no session state is written and the user
/// only learns that the credentials were rejected.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username.clone(),
            };

            // Rotate the session id so a pre-login cookie never names an
            // authenticated session.
            if let Err(e) = session.cycle_id().await {
                tracing::error!("Failed to cycle session id: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            tracing::info!(user_id = %user.id, "User logged in");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignupTemplate {
        error: query.error.as_deref().map(signup_flash),
    }
}

/// Handle signup form submission.
///
/// Creates the account and sends the user to the login page; registration
/// never logs the user in by itself.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    match AuthService::new(state.pool())
        .register(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            Redirect::to("/auth/login?success=registered").into_response()
        }
        Err(AuthError::UsernameTaken) => {
            Redirect::to("/auth/signup?error=username_taken").into_response()
        }
        Err(AuthError::InvalidUsername(_)) => {
            Redirect::to("/auth/signup?error=invalid_username").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Redirect::to("/auth/signup?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the session. Idempotent: flushing an already-empty session is a
/// no-op, so logging out twice is not an error.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the session record itself.
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/auth/login").into_response()
}
