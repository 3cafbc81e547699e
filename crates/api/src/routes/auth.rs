use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use bson::doc;
use mediq_services::dao::base::DaoError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_doctor: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = state.auth.hash_password(&body.password)?;

    // The very first account becomes the administrator; every later
    // registration is a regular user. The partial unique index on
    // is_admin backs this up, so a concurrent registration that also
    // saw an empty collection fails the insert rather than producing
    // a second administrator.
    let is_admin = state.users.base.count(doc! {}).await? == 0;

    let user = match state
        .users
        .create(body.name.clone(), body.email.clone(), password_hash.clone(), is_admin)
        .await
    {
        Ok(user) => user,
        Err(DaoError::DuplicateKey(_)) if is_admin => {
            // Either the email is taken or someone else claimed the
            // administrator slot first. Disambiguate and fall back.
            if state.users.find_by_email(&body.email).await.is_ok() {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
            state
                .users
                .create(body.name.clone(), body.email.clone(), password_hash, false)
                .await?
        }
        Err(e) => return Err(e.into()),
    };

    let user_id = user.id.ok_or_else(|| {
        ApiError::Internal("Created user has no id".to_string())
    })?;

    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name)?;

    let headers = auth_cookie_headers(&tokens.access_token, tokens.expires_in)?;

    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: UserResponse {
            id: user_id.to_hex(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            is_doctor: user.is_doctor,
        },
    };

    Ok((StatusCode::CREATED, headers, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let user = state
        .users
        .find_by_email(&body.email)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let password_hash = user
        .password_hash
        .as_ref()
        .ok_or_else(|| ApiError::Unauthorized("No password set".to_string()))?;

    let valid = state.auth.verify_password(&body.password, password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::Internal("User has no id".to_string()))?;
    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name)?;

    let headers = auth_cookie_headers(&tokens.access_token, tokens.expires_in)?;

    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: UserResponse {
            id: user_id.to_hex(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            is_doctor: user.is_doctor,
        },
    };

    Ok((headers, Json(response)))
}

pub async fn logout() -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let cookie = "access_token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0";
    headers.insert(
        header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| ApiError::Internal("Invalid cookie header".to_string()))?,
    );
    Ok(headers)
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;

    Ok(Json(UserResponse {
        id: auth.user_id.to_hex(),
        name: user.name,
        email: user.email,
        is_admin: user.is_admin,
        is_doctor: user.is_doctor,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let claims = state.auth.verify_refresh_token(&body.refresh_token)?;

    let user_id = bson::oid::ObjectId::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid user ID".to_string()))?;

    let user = state.users.base.find_by_id(user_id).await?;

    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name)?;

    let headers = auth_cookie_headers(&tokens.access_token, tokens.expires_in)?;

    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: UserResponse {
            id: user_id.to_hex(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            is_doctor: user.is_doctor,
        },
    };

    Ok((headers, Json(response)))
}

fn auth_cookie_headers(access_token: &str, expires_in: u64) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let cookie = format!(
        "access_token={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        access_token, expires_in
    );
    headers.insert(
        header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| ApiError::Internal("Invalid cookie header".to_string()))?,
    );
    Ok(headers)
}
