//! Item route handlers.
//!
//! Every handler takes [`RequireAuth`] and threads the resolved identity
//! into the repository call; the ownership filter is visible at each call
//! site. A missing and a non-owned id get the same response.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use curio_core::ItemId;

use crate::db::{ItemRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Item;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Item create/update form data.
///
/// Empty strings are accepted; there is deliberately no validation beyond
/// the fields existing.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Item list page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/index.html")]
pub struct IndexTemplate {
    pub username: String,
    pub items: Vec<Item>,
}

/// New item page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/new.html")]
pub struct NewItemTemplate;

/// Edit item page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/edit.html")]
pub struct EditItemTemplate {
    pub item: Item,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the caller's items, in insertion order.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let items = ItemRepository::new(state.pool())
        .list_for_owner(user.id)
        .await?;

    Ok(IndexTemplate {
        username: user.username.to_string(),
        items,
    }
    .into_response())
}

/// Display the new-item form.
pub async fn new_item(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    NewItemTemplate
}

/// Handle new-item form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    // Owner comes from the session, never from the form.
    let item = ItemRepository::new(state.pool())
        .create(user.id, &form.name, &form.description)
        .await?;

    tracing::debug!(item_id = %item.id, user_id = %user.id, "Item created");
    Ok(Redirect::to("/").into_response())
}

/// Display the edit form for an owned item.
pub async fn edit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<ItemId>,
) -> Result<Response, AppError> {
    match ItemRepository::new(state.pool())
        .get_for_edit(user.id, item_id)
        .await?
    {
        Some(item) => Ok(EditItemTemplate { item }.into_response()),
        // A missing id and someone else's id look the same: back to the list.
        None => Ok(Redirect::to("/").into_response()),
    }
}

/// Handle edit form submission.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<ItemId>,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    match ItemRepository::new(state.pool())
        .update(user.id, item_id, &form.name, &form.description)
        .await
    {
        // NotFound covers both true absence and another owner's item.
        Ok(()) | Err(RepositoryError::NotFound) => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Handle item deletion.
///
/// Fire-and-forget: a missing or non-owned id deletes nothing and still
/// redirects back to the list.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<ItemId>,
) -> Result<Response, AppError> {
    ItemRepository::new(state.pool())
        .delete(user.id, item_id)
        .await?;

    Ok(Redirect::to("/").into_response())
}
