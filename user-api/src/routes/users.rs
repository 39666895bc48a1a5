use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{NewUser, User, UserDetail, UserId},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/avatar", get(get_avatar).delete(delete_avatar))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    email: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i32(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

fn user_id(path: Result<Path<i32>, PathRejection>) -> Result<UserId, ApiError> {
    let Path(id) = path?;
    Ok(UserId::from(id))
}

#[instrument(name = "POST /users", skip_all)]
async fn create_user(
    State(app_state): State<AppState>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(body) = body?;
    let new_user = NewUser::new(&body.email, &body.first_name, &body.last_name)?;
    let user = app_state.user_service.create_user(new_user).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(name = "GET /users/:user_id", skip(app_state))]
async fn get_user(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserDetail>, ApiError> {
    let user_id = user_id(path)?;
    let detail = app_state.user_service.get_user_detail(&user_id).await?;

    Ok(Json(detail))
}

#[instrument(name = "GET /users/:user_id/avatar", skip(app_state))]
async fn get_avatar(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<String, ApiError> {
    let user_id = user_id(path)?;
    let bytes = app_state.avatar_service.resolve_avatar(&user_id).await?;

    Ok(STANDARD.encode(bytes))
}

#[instrument(name = "DELETE /users/:user_id/avatar", skip(app_state))]
async fn delete_avatar(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<bool>, ApiError> {
    let user_id = user_id(path)?;
    let removed = app_state.avatar_service.remove_avatar(&user_id).await?;

    Ok(Json(removed))
}
