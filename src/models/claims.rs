//! JWT claims for dashboard users

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role allowed to read the analytics dashboard
pub const ADMIN_ROLE: &str = "ADMIN";

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, role: impl Into<String>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}
