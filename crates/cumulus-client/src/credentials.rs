//! API credential material

/// Default environment variable for the API username
pub const USERNAME_ENV: &str = "CUMULUS_USERNAME";
/// Default environment variable for the API password
pub const PASSWORD_ENV: &str = "CUMULUS_PASSWORD";
/// Default environment variable for the API token
pub const TOKEN_ENV: &str = "CUMULUS_TOKEN";

/// Credentials for the cloud API
///
/// A token takes precedence over username/password when both are present.
/// Token authentication is a client capability; see
/// [`CloudApi::supports_token_auth`](crate::CloudApi::supports_token_auth).
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(username: Option<String>, password: Option<String>, token: Option<String>) -> Self {
        Self {
            username,
            password,
            token,
        }
    }

    /// Fill unset fields from the named environment variables.
    ///
    /// Explicit values win over the environment; unset variables leave the
    /// field empty.
    #[must_use]
    pub fn or_env(mut self, username_env: &str, password_env: &str, token_env: &str) -> Self {
        self.username = self.username.or_else(|| std::env::var(username_env).ok());
        self.password = self.password.or_else(|| std::env::var(password_env).ok());
        self.token = self.token.or_else(|| std::env::var(token_env).ok());
        self
    }

    /// Fill unset fields from the default `CUMULUS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().or_env(USERNAME_ENV, PASSWORD_ENV, TOKEN_ENV)
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// True when no usable credential material is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.username.is_none()
    }
}

// Secrets must not leak into logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
