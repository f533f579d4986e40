// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store backed by `DashMap`, for tests and local runs
//! without Postgres.

use super::{email_taken, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    /// Unique email index
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of rows holding exactly this email.
    pub fn count_email(&self, email: &str) -> usize {
        self.users.iter().filter(|u| u.email == email).count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        // Holding the entry's shard lock makes check-and-claim atomic.
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(email_taken(&new_user.email)),
            Entry::Vacant(slot) => {
                let user = new_user.into_user();
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn touch_last_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        Ok(self.users.get_mut(&id).map(|mut user| {
            user.last_login = Some(at);
            user.clone()
        }))
    }
}
