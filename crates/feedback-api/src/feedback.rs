use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use feedback_types::forms::{FeedbackForm, FeedbackUpdateForm};

use crate::error::{AuthFailure, HandlerError};
use crate::session::AuthContext;
use crate::{AppState, pages};

pub async fn add_form(
    Path(username): Path<String>,
    ctx: AuthContext,
) -> Result<Response, HandlerError> {
    ctx.require_self(&username)?;
    Ok(pages::feedback_form(&username).into_response())
}

pub async fn add(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ctx: AuthContext,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, HandlerError> {
    // The stored owner is the session identity, never form input.
    let owner = ctx.require_self(&username)?.to_string();

    state.db.insert_feedback(&form.title, &form.content, &owner)?;
    Ok(Redirect::to(&format!("/users/{}", owner)).into_response())
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ctx: AuthContext,
) -> Result<Response, HandlerError> {
    let row = state.db.get_feedback(id)?.ok_or(AuthFailure::NotFound)?;
    ctx.require_owner(&row)?;
    Ok(pages::feedback_update_form(&row).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ctx: AuthContext,
    Form(form): Form<FeedbackUpdateForm>,
) -> Result<Response, HandlerError> {
    let row = state.db.get_feedback(id)?.ok_or(AuthFailure::NotFound)?;
    let owner = ctx.require_owner(&row)?.to_string();

    // Partial update: absent fields keep their stored values.
    let title = form.title.unwrap_or(row.title);
    let content = form.content.unwrap_or(row.content);
    state.db.update_feedback(id, &title, &content)?;

    Ok(Redirect::to(&format!("/users/{}", owner)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ctx: AuthContext,
) -> Result<Response, HandlerError> {
    let row = state.db.get_feedback(id)?.ok_or(AuthFailure::NotFound)?;
    let owner = ctx.require_owner(&row)?.to_string();

    state.db.delete_feedback(id)?;
    Ok(Redirect::to(&format!("/users/{}", owner)).into_response())
}
