//! Authentication collaborator
//!
//! A demo-grade session provider: users and sessions are held in memory,
//! passwords are stored as SHA-256 digests and session tokens are random
//! opaque strings. This is deliberately not an authentication protocol;
//! it exists so the dashboard has a signed-in/signed-out state and a
//! sign-out action that can fail with a human-readable message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::password;

/// Authentication failures, all carrying a human-readable message
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    EmailTaken,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Password does not meet the strength requirements: {0}")]
    WeakPassword(String),

    #[error("There was an error signing out.")]
    NoSuchSession,
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Profile of a signed-in user, as shown on the dashboard profile tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    pub auth_provider: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// Session-based authentication operations
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account and open a session for it
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AuthResult<String>;

    /// Open a session for an existing account
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<String>;

    /// Close the session behind `token`
    async fn sign_out(&self, token: &str) -> AuthResult<()>;

    /// Look up the profile for a session token, if the session is live
    async fn session(&self, token: &str) -> Option<UserProfile>;
}

struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

/// In-memory [`AuthProvider`] implementation
#[derive(Default)]
pub struct SessionAuth {
    users: RwLock<HashMap<String, StoredUser>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_password(password: &str) -> String {
        format!("{:x}", Sha256::digest(password.as_bytes()))
    }

    fn random_token(len: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    fn generate_api_key() -> String {
        format!("sk-sakram-{}", Self::random_token(24))
    }

    async fn open_session(&self, email: &str) -> String {
        let token = Self::random_token(32);
        self.sessions
            .write()
            .await
            .insert(token.clone(), email.to_string());
        token
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AuthResult<String> {
        let evaluation = password::evaluate(password);
        if !evaluation.is_valid {
            return Err(AuthError::WeakPassword(evaluation.label));
        }

        {
            let mut users = self.users.write().await;
            if users.contains_key(email) {
                return Err(AuthError::EmailTaken);
            }
            users.insert(
                email.to_string(),
                StoredUser {
                    profile: UserProfile {
                        name: name.to_string(),
                        email: email.to_string(),
                        role: "admin".to_string(),
                        auth_provider: "email".to_string(),
                        api_key: Self::generate_api_key(),
                        created_at: Utc::now(),
                    },
                    password_hash: Self::hash_password(password),
                },
            );
        }

        Ok(self.open_session(email).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<String> {
        let users = self.users.read().await;
        let user = users.get(email).ok_or(AuthError::InvalidCredentials)?;
        if user.password_hash != Self::hash_password(password) {
            return Err(AuthError::InvalidCredentials);
        }
        drop(users);

        Ok(self.open_session(email).await)
    }

    async fn sign_out(&self, token: &str) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .remove(token)
            .map(|_| ())
            .ok_or(AuthError::NoSuchSession)
    }

    async fn session(&self, token: &str) -> Option<UserProfile> {
        let email = self.sessions.read().await.get(token).cloned()?;
        let users = self.users.read().await;
        users.get(&email).map(|u| u.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_session_returns_profile() {
        let auth = SessionAuth::new();
        let token = auth
            .sign_up("Asha", "asha@example.com", "Abcdef1!")
            .await
            .unwrap();

        let profile = auth.session(&token).await.unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.email, "asha@example.com");
        assert!(profile.api_key.starts_with("sk-sakram-"));
    }

    #[tokio::test]
    async fn sign_up_rejects_weak_passwords() {
        let auth = SessionAuth::new();
        let err = auth
            .sign_up("Asha", "asha@example.com", "abcdefgh")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn sign_in_requires_matching_password() {
        let auth = SessionAuth::new();
        auth.sign_up("Asha", "asha@example.com", "Abcdef1!")
            .await
            .unwrap();

        assert!(auth.sign_in("asha@example.com", "Abcdef1!").await.is_ok());
        assert!(matches!(
            auth.sign_in("asha@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("other@example.com", "Abcdef1!").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn sign_out_invalidates_the_session_and_fails_when_repeated() {
        let auth = SessionAuth::new();
        let token = auth
            .sign_up("Asha", "asha@example.com", "Abcdef1!")
            .await
            .unwrap();

        auth.sign_out(&token).await.unwrap();
        assert!(auth.session(&token).await.is_none());

        let err = auth.sign_out(&token).await.unwrap_err();
        assert_eq!(err.to_string(), "There was an error signing out.");
    }
}
