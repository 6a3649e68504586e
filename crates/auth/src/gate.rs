use subtle::ConstantTimeEq;
use thiserror::Error;

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials were absent, malformed, or wrong. Carries no detail about
    /// which part failed.
    #[error("invalid credentials")]
    Unauthorized,

    #[error("malformed authorization header: {0}")]
    MalformedAuthorization(String),
}

/// Verifies presented credentials against the configured pair.
#[derive(Debug, Clone)]
pub struct AuthGate {
    expected: Credentials,
}

impl AuthGate {
    pub fn new(expected: Credentials) -> Self {
        Self { expected }
    }

    /// Constant-time check of both fields.
    ///
    /// Username and password are compared independently and the results are
    /// combined with a non-short-circuiting AND, so a wrong username costs the
    /// same as a wrong password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.expected.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.expected.password.as_bytes());
        bool::from(user_ok & pass_ok)
    }

    pub fn check(&self, presented: &Credentials) -> Result<(), AuthError> {
        if self.verify(&presented.username, &presented.password) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
