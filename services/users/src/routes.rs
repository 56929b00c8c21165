//! Users service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    error::{ApiError, ApiResult},
    models::{NewUser, UpdateUser},
    state::AppState,
    validation::{validate_email, validate_name},
};

type UserId = WithRejection<Path<i32>, ApiError>;

/// Create the router for the users service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Static greeting
pub async fn hello() -> impl IntoResponse {
    Json(json!({
        "message": "Hello World!!"
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-service"
    }))
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.users.list().await?;

    Ok(Json(users))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> ApiResult<impl IntoResponse> {
    let user = state.users.get(id).await?;

    Ok(Json(user))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload: NewUser = decode_json(&body)?;
    validate_fields(&payload.name, &payload.email)?;

    let user = state.users.create(&payload).await?;
    let location = format!("/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// Replace a user's name and email
pub async fn update_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload: UpdateUser = decode_json(&body)?;
    validate_fields(&payload.name, &payload.email)?;

    let user = state.users.update(id, &payload).await?;

    Ok(Json(user))
}

/// Delete a user by ID
pub async fn delete_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> ApiResult<impl IntoResponse> {
    state.users.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Decode a JSON body whatever its Content-Type header says
fn decode_json<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    let Json(value) = Json::<T>::from_bytes(body)?;
    Ok(value)
}

fn validate_fields(name: &str, email: &str) -> ApiResult<()> {
    validate_name(name).map_err(ApiError::BadRequest)?;
    validate_email(email).map_err(ApiError::BadRequest)?;
    Ok(())
}
