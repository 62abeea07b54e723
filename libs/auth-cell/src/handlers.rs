use axum::{
    extract::{Extension, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::extractor::MaybeUser;
use shared_utils::session::{issue_token, SESSION_COOKIE};
use shared_utils::views::{notice, render, Context};
use shared_utils::AppState;

use crate::models::{AuthError, AuthPageQuery, LoginForm, SignupForm};
use crate::services::UserService;

#[axum::debug_handler]
pub async fn signup_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<AuthPageQuery>,
) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("notice", &notice(query.error.as_deref()));

    render(&state.views, "signup.html", user.as_ref(), context)
}

#[axum::debug_handler]
pub async fn login_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<AuthPageQuery>,
) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("notice", &notice(query.error.as_deref()));

    render(&state.views, "login.html", user.as_ref(), context)
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, AppError> {
    let users = UserService::new(state.store.clone());

    match users.register(form).await {
        Ok(_) => Ok(Redirect::to("/login")),
        Err(AuthError::EmailTaken) => Ok(Redirect::to("/signup?error=exists")),
        Err(AuthError::InvalidInput(reason)) => {
            debug!("Signup rejected: {}", reason);
            Ok(Redirect::to("/signup?error=invalid"))
        }
        Err(e) => Err(e.into()),
    }
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let users = UserService::new(state.store.clone());

    let user = match users.authenticate(form).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            return Ok(Redirect::to("/login?error=credentials").into_response())
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(
        &user.to_current_user(),
        &state.config.session_secret,
        state.config.session_ttl_hours,
    )
    .map_err(AuthError::Session)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
}

pub async fn logout(Extension(user): Extension<CurrentUser>, jar: CookieJar) -> (CookieJar, Redirect) {
    debug!("User {} logged out", user.id);
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/")), Redirect::to("/"))
}

pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}
