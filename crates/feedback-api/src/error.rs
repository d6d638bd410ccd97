use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

/// Authorization and lookup denials. Policy: every denial is a silent
/// redirect, never a rendered 403/404 page, so a response does not reveal
/// whether the target resource exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no session identity")]
    NotAuthenticated,
    #[error("session identity does not match resource owner")]
    NotAuthorized,
    #[error("resource does not exist")]
    NotFound,
}

impl AuthFailure {
    /// Missing identity goes to registration; mismatches and missing
    /// resources go home.
    pub fn redirect(self) -> Redirect {
        match self {
            AuthFailure::NotAuthenticated => Redirect::to("/register"),
            AuthFailure::NotAuthorized | AuthFailure::NotFound => Redirect::to("/home"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Denied(#[from] AuthFailure),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::Denied(failure) => failure.redirect().into_response(),
            HandlerError::Internal(err) => {
                error!("internal error: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
