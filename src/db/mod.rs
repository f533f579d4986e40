// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential store (Postgres, with an in-memory variant for tests).

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::error::AppError;
use crate::models::{NewUser, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Typed operations on the `users` table.
///
/// Each method is a single atomic statement; there are no multi-statement
/// transactions.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Insert a new user. Returns [`AppError::Conflict`] if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Set `last_login`. Returns the updated record, or `None` if the user vanished.
    async fn touch_last_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, AppError>;
}

pub(crate) fn email_taken(email: &str) -> AppError {
    AppError::Conflict(format!("Email {} is already registered", email))
}
