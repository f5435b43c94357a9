//! Bearer credential providers

use crate::error::AuthError;
use async_trait::async_trait;
use std::fmt;
use tokio::process::Command;

/// Opaque bearer credential, fetched once per session
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::Empty);
        }
        Ok(Self(token))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Source of bearer credentials
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Human-readable provider name for logs
    fn name(&self) -> &str;

    /// Obtain a fresh token
    async fn fetch_token(&self) -> Result<AuthToken, AuthError>;
}

/// Identity token from the gcloud CLI (`gcloud auth print-identity-token`)
#[derive(Debug, Clone)]
pub struct GcloudAuthProvider {
    program: String,
}

impl GcloudAuthProvider {
    pub fn new() -> Self {
        Self::with_program("gcloud")
    }

    /// Use a different executable in place of `gcloud`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GcloudAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for GcloudAuthProvider {
    fn name(&self) -> &str {
        &self.program
    }

    async fn fetch_token(&self) -> Result<AuthToken, AuthError> {
        let output = Command::new(&self.program)
            .args(["auth", "print-identity-token"])
            .output()
            .await
            .map_err(|source| AuthError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AuthError::Command {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        AuthToken::new(String::from_utf8_lossy(&output.stdout))
    }
}

/// A token supplied up front (flag or environment)
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AuthToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self {
            token: AuthToken::new(token)?,
        })
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_token(&self) -> Result<AuthToken, AuthError> {
        Ok(self.token.clone())
    }
}
