//! Registration, authentication and profile endpoints

use axum::{extract::State, http::StatusCode, Form, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterUser, TokenForm, TokenResponse, User},
};

use super::AuthenticatedUser;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Username already registered or invalid input")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(registration): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    registration
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.users.register(&registration).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/token",
    tag = "users",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn token(
    State(state): State<crate::AppState>,
    Form(form): Form<TokenForm>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .users
        .authenticate(&form.username, &form.password)
        .await?;

    Ok(Json(token))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user))
}
