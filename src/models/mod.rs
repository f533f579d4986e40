// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod auth;
pub mod token;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
pub use token::{Claims, TokenPair, TokenPayload};
pub use user::{NewUser, PublicUser, Role, User};
