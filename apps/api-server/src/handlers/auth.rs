//! Authentication handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::{NewUser, User};
use inkwell_core::error::DomainError;
use inkwell_shared::dto::{AuthResponse, CredentialsRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn require_credentials(req: &CredentialsRequest) -> AppResult<()> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    Ok(())
}

fn issue(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state.tokens.generate_token(user.id, &user.username)?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req)?;

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .create(NewUser::new(req.username, password_hash))
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(HttpResponse::Created().json(issue(&state, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req)?;

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(invalid)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(username = %req.username, "Login rejected");
        return Err(invalid());
    }

    Ok(HttpResponse::Ok().json(issue(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "User",
            id: identity.user_id,
        })?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
