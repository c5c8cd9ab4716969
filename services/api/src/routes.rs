//! API service routes
//!
//! Public routes: signup, signin, health. Everything else sits behind the
//! authentication middleware. Unmatched paths fall through to a JSON 404.

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{AUTH_COOKIE, AuthUser, auth_middleware},
    models::{NewMovie, NewUser, UserInfoResponse, UserResponse},
    repositories::{hash_password, verify_password},
    state::AppState,
    validation,
};

/// Request for user registration
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request for profile update
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

/// Response for user login
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/signout", post(signout))
        .route("/users/me", get(get_user_info).patch(update_user_info))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:movie_id", delete(delete_movie))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .merge(protected_routes)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "movies-api"
    }))
}

/// Unwrap a JSON body, normalizing deserialization failures into the
/// Validation error kind so clients always get a `{message}` response
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;

    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User with this email is already registered".to_string(),
        ));
    }

    // Argon2 is CPU-bound; keep it off the async worker threads.
    let password = payload.password;
    let password_hash = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            ApiError::InternalServerError
        })?
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalServerError
        })?;

    let user = state
        .user_repository
        .create(&NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await?;

    info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log a user in, issuing a session token
///
/// Unknown email and wrong password produce the same Unauthorized
/// response.
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password must not be empty".to_string(),
        ));
    }

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let password_hash = user.password_hash.clone();
    let password = payload.password;
    let password_valid = task::spawn_blocking(move || verify_password(&password_hash, &password))
        .await
        .map_err(|e| {
            error!("Password verification task failed: {}", e);
            ApiError::InternalServerError
        })?
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !password_valid {
        return Err(ApiError::Unauthorized);
    }

    let token = state.jwt_service.generate_token(user.id).map_err(|e| {
        error!("Failed to generate session token: {}", e);
        ApiError::InternalServerError
    })?;

    info!("User {} signed in", user.id);

    let mut headers = HeaderMap::new();
    if let Ok(value) =
        HeaderValue::from_str(&build_auth_cookie(&token, state.jwt_service.token_expiry()))
    {
        headers.insert(SET_COOKIE, value);
    }

    Ok((StatusCode::OK, headers, Json(TokenResponse { token })))
}

/// Log a user out by clearing the session cookie; idempotent
pub async fn signout(Extension(auth_user): Extension<AuthUser>) -> impl IntoResponse {
    info!("User {} signed out", auth_user.id);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&clear_auth_cookie()) {
        headers.insert(SET_COOKIE, value);
    }

    (
        StatusCode::OK,
        headers,
        Json(json!({"message": "Signed out"})),
    )
}

/// Get the current user's profile
pub async fn get_user_info(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfoResponse::from(user)))
}

/// Update the current user's profile
pub async fn update_user_info(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;

    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;

    // Pre-check the email collision; the unique index catches the race.
    if let Some(existing) = state.user_repository.find_by_email(&payload.email).await? {
        if existing.id != auth_user.id {
            return Err(ApiError::Conflict(
                "User with this email is already registered".to_string(),
            ));
        }
    }

    let user = state
        .user_repository
        .update_info(auth_user.id, &payload.name, &payload.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// List the caller's saved movies
pub async fn list_movies(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let movies = state.movie_repository.list_by_owner(auth_user.id).await?;

    Ok(Json(movies))
}

/// Save a movie for the caller
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;

    validation::validate_movie(&payload).map_err(ApiError::Validation)?;

    let movie = state.movie_repository.create(auth_user.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Delete one of the caller's saved movies
///
/// The ownership check happens on a read before the DELETE so an
/// unauthorized request never destroys the record.
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movie_id = movie_id
        .parse::<Uuid>()
        .map_err(|_| ApiError::Validation("Invalid movie id".to_string()))?;

    let movie = state
        .movie_repository
        .find_by_id(movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    if movie.owner != auth_user.id {
        return Err(ApiError::Forbidden(
            "Cannot delete another user's movie".to_string(),
        ));
    }

    let deleted = state
        .movie_repository
        .delete(movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    Ok(Json(deleted))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Requested resource was not found".to_string())
}

/// Build the Set-Cookie value carrying the session token
fn build_auth_cookie(token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=None; Secure",
        AUTH_COOKIE, token, max_age_secs
    )
}

/// Build the Set-Cookie value clearing the session cookie
fn clear_auth_cookie() -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=None; Secure",
        AUTH_COOKIE
    )
}
