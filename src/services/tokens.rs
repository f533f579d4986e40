// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signing and verification of access/refresh tokens (HS256).
//!
//! Access and refresh tokens use separate keys, so one can never be
//! presented in place of the other.

use crate::config::Config;
use crate::models::{Claims, TokenPair, TokenPayload};
use crate::time_utils::unix_now_secs;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Clock-skew allowance on `exp`. Zero, so a token dies at exactly its TTL.
const VALIDATION_LEEWAY_SECS: u64 = 0;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl SigningKeys {
    fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    fn sign(&self, payload: &TokenPayload) -> anyhow::Result<String> {
        let now = unix_now_secs()?;
        let exp = now
            .checked_add(self.ttl_secs)
            .and_then(|exp| usize::try_from(exp).ok())
            .ok_or_else(|| anyhow::anyhow!("Token TTL of {}s overflows exp", self.ttl_secs))?;

        let claims = Claims {
            payload: payload.clone(),
            iat: now as usize,
            exp,
            jti: Uuid::new_v4(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = VALIDATION_LEEWAY_SECS;
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// Issues and verifies session token pairs.
pub struct TokenIssuer {
    access: SigningKeys,
    refresh: SigningKeys,
}

impl TokenIssuer {
    pub fn new(config: &Config) -> Self {
        Self {
            access: SigningKeys::new(&config.access_token_secret, config.access_token_ttl_secs),
            refresh: SigningKeys::new(
                &config.refresh_token_secret,
                config.refresh_token_ttl_secs,
            ),
        }
    }

    /// Sign a new access/refresh pair for the same identity.
    pub fn issue_pair(&self, payload: &TokenPayload) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.access.sign(payload)?,
            refresh_token: self.refresh.sign(payload)?,
        })
    }

    /// Check signature and expiry of an access token.
    pub fn verify_access(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        self.access.verify(token)
    }

    /// Check signature and expiry of a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        self.refresh.verify(token)
    }
}
