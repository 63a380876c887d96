/// Authentication endpoints
///
/// Signup and signin check credentials and return the account; no token or
/// session is issued, so signout only acknowledges the request.
///
/// # Endpoints
///
/// - `POST /auth/signup` - Register new user
/// - `POST /auth/signin` - Check credentials
/// - `POST /auth/signout` - Acknowledge signout

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    routes::health::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::user::{NewUser, User};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Signup request
#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Signin request
#[derive(Deserialize, Validate)]
pub struct SigninRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Account returned by signup and signin
///
/// Never carries the password or its hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message: String,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            is_active: user.is_active,
            created_at: user.timestamps.created_at,
            updated_at: user.timestamps.updated_at,
            message: "Login successful".to_string(),
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/signup
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "username": "ada",
///   "password": "secret-pw"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, email taken, or the user could not be created
/// - `500 Internal Server Error`: The email lookup failed
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let existing = state
        .users
        .get_user_by_email(&req.email)
        .await
        .map_err(|err| ApiError::InternalError(format!("Signup email lookup failed: {}", err)))?;

    if existing.is_some() {
        warn!(email = %req.email, "Signup with an email already in use");
        return Err(ApiError::BadRequest(
            "A user with this email already exists".to_string(),
        ));
    }

    let user = state
        .users
        .create_user(NewUser {
            email: req.email,
            username: req.username,
            password: req.password,
        })
        .await
        .ok_or_else(|| ApiError::BadRequest("Failed to create user".to_string()))?;

    info!(user_id = %user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Check credentials
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Wrong email or password, or the account is deactivated
/// - `500 Internal Server Error`: The lookup failed
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SigninRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .users
        .authenticate_user(&req.email, &req.password)
        .await
        .map_err(|err| ApiError::InternalError(format!("Signin lookup failed: {}", err)))?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    if !user.is_active {
        warn!(user_id = %user.id, "Signin attempt on deactivated account");
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }

    info!(user_id = %user.id, "User signed in");
    Ok(Json(user.into()))
}

/// Acknowledge signout
pub async fn signout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Successfully signed out".to_string(),
    })
}
