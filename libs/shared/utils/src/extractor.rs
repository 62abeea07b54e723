use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;

use crate::session::{validate_token, SESSION_COOKIE};
use crate::state::AppState;

/// Reads the session token from `Authorization: Bearer` or, failing that,
/// from the session cookie.
pub fn session_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(auth_header) = headers.get(AUTHORIZATION) {
        let auth_value = auth_header
            .to_str()
            .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

        return auth_value
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()));
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Auth("Login required".to_string()))
}

pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<CurrentUser, AppError> {
    let token = session_token(headers)?;
    validate_token(&token, secret).map_err(AppError::Auth)
}

/// Guards JSON API routes: rejects with 401 when there is no valid session.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state.config.session_secret)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Guards page routes: sends the browser to the login form instead of
/// returning an error body.
pub async fn page_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.config.session_secret) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => Redirect::to("/login").into_response(),
    }
}

/// The session user when one is present, for routes that work either way.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            authenticate(&parts.headers, &state.config.session_secret).ok(),
        ))
    }
}
