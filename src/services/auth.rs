// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and refresh-token rotation.
//!
//! Refresh tokens are stateless: rotation hands out a new pair but the
//! presented token stays valid until it expires, since nothing records
//! which tokens have been spent.

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{
    AuthResponse, LoginRequest, NewUser, PublicUser, RefreshRequest, RegisterRequest, TokenPayload,
    User,
};
use crate::services::password::PasswordHasher;
use crate::services::tokens::TokenIssuer;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Orchestrates the credential store, password hasher and token issuer.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Check credentials and start a session.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        let Some(user) = self.store.find_by_email(&req.email).await? else {
            tracing::warn!("Login failed: no such email");
            return Err(invalid_credentials());
        };

        if !self.verify_password(req.password, user.password.clone()).await? {
            tracing::warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(invalid_credentials());
        }

        let user = self
            .store
            .touch_last_login(user.id, Utc::now())
            .await?
            .ok_or_else(invalid_credentials)?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    /// Create an account and start a session for it.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        req.validate()?;

        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(crate::db::email_taken(&req.email));
        }

        let password_hash = self.hash_password(req.password).await?;

        let user = self
            .store
            .insert(NewUser {
                email: req.email,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
                date_of_birth: req.date_of_birth,
                photo_url: req.photo_url,
                role: req.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        self.session_for(user)
    }

    /// Exchange a valid refresh token for a new pair.
    pub async fn refresh(&self, req: RefreshRequest) -> Result<AuthResponse> {
        let claims = self
            .tokens
            .verify_refresh(&req.refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AppError::InvalidToken
            })?;

        let user_id = claims.payload.user_id;
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tracing::debug!(user_id = %user.id, "Session refreshed");
        self.session_for(user)
    }

    /// Public profile of an already-authenticated user.
    pub async fn current_user(&self, user_id: Uuid) -> Result<PublicUser> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    fn session_for(&self, user: User) -> Result<AuthResponse> {
        let tokens = self.tokens.issue_pair(&TokenPayload::from(&user))?;
        Ok(AuthResponse {
            tokens,
            user: PublicUser::from(user),
        })
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Hashing task failed: {}", e))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, stored_hash: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Verification task failed: {}", e))??;
        Ok(matches)
    }
}

fn invalid_credentials() -> AppError {
    AppError::NotFound(AppError::INVALID_CREDENTIALS.to_string())
}
