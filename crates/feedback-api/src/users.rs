use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::error::{AuthFailure, HandlerError};
use crate::session::AuthContext;
use crate::{AppState, pages, session};

pub async fn index() -> Redirect {
    Redirect::to("/register")
}

pub async fn home(ctx: AuthContext) -> Html<String> {
    pages::home(ctx.identity.as_deref())
}

pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ctx: AuthContext,
) -> Result<Response, HandlerError> {
    ctx.require_self(&username)?;

    // Two reads per request; run them off the async runtime.
    let db = state.clone();
    let name = username.clone();
    let (user, feedback) = tokio::task::spawn_blocking(move || {
        let user = db.db.get_user(&name)?;
        let feedback = db.db.list_feedback_for(&name)?;
        Ok::<_, anyhow::Error>((user, feedback))
    })
    .await
    .map_err(|e| anyhow!("spawn_blocking join error: {}", e))??;

    let user = user.ok_or(AuthFailure::NotFound)?;
    Ok(pages::profile(&user, &feedback).into_response())
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ctx: AuthContext,
    jar: CookieJar,
) -> Result<Response, HandlerError> {
    ctx.require_self(&username)?;

    // FK cascade removes the user's feedback rows with the user.
    state.db.delete_user(&username)?;
    info!("deleted user {}", username);

    let jar = jar.remove(session::removal_cookie());
    Ok((jar, Redirect::to("/register")).into_response())
}
