// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::ValidateEmail;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::User;
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Create a new account.
///
/// Emails are lowercased before storage and lookup, so two addresses
/// differing only in case collide here.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let email = body.email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::EmptyName);
    }

    let record = password::derive(&body.password).map_err(|e| match e {
        password::PasswordError::WeakPassword(min) => AppError::WeakPassword(min),
        password::PasswordError::Rng => {
            AppError::Internal(anyhow::anyhow!("System RNG unavailable"))
        }
    })?;

    let user = User {
        user_id: uuid::Uuid::new_v4().to_string(),
        email,
        name: name.to_string(),
        password: record,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.db.create_user(&user).await?;

    tracing::info!(user_id = %user.user_id, "User registered");

    Ok(Json(RegisterResponse { ok: true }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
}

/// Exchange credentials for a session token.
///
/// Unknown email and wrong password take the same path to the same
/// error, so responses cannot be used to enumerate accounts.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = body.email.trim().to_lowercase();

    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify(&body.password, &user.password) {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(&user.user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.user_id, "Login successful");

    Ok(Json(LoginResponse {
        token,
        name: user.name,
    }))
}
