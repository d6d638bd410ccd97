use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use feedback_types::forms::{LoginForm, RegisterForm};

use crate::error::HandlerError;
use crate::session::AuthContext;
use crate::{AppState, pages, password, session};

fn profile_url(username: &str) -> String {
    format!("/users/{}", username)
}

pub async fn register_form(ctx: AuthContext) -> Response {
    // Already logged in: straight to the profile.
    if let Some(me) = ctx.identity.as_deref() {
        return Redirect::to(&profile_url(me)).into_response();
    }
    pages::register_form(None).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, HandlerError> {
    let password_hash = password::hash_password(&form.password)?;

    if let Err(err) = state.db.create_user(
        &form.username,
        &password_hash,
        &form.email,
        &form.first_name,
        &form.last_name,
    ) {
        if feedback_db::is_constraint_violation(&err) {
            return Ok(
                pages::register_form(Some("That username or email is already taken."))
                    .into_response(),
            );
        }
        return Err(err.into());
    }

    info!("registered user {}", form.username);

    let token = session::create_session_token(&state.session_secret, &form.username)?;
    let jar = jar.add(session::session_cookie(token));
    Ok((jar, Redirect::to(&profile_url(&form.username))).into_response())
}

pub async fn login_form() -> Html<String> {
    pages::login_form()
}

/// "Unknown user" and "wrong password" take the same path out, so the
/// response never confirms that a username exists.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, HandlerError> {
    let user = state
        .db
        .get_user(&form.username)?
        .filter(|user| password::verify_password(&user.password, &form.password));

    match user {
        Some(user) => {
            info!("user {} logged in", user.username);
            let token = session::create_session_token(&state.session_secret, &user.username)?;
            let jar = jar.add(session::session_cookie(token));
            Ok((jar, Redirect::to(&profile_url(&user.username))).into_response())
        }
        None => Ok(Redirect::to("/register").into_response()),
    }
}

/// Idempotent: clearing an absent session is a no-op.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(session::removal_cookie()), Redirect::to("/register"))
}
