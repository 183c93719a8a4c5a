//! Basic-auth credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Password used for negative authentication checks.
const WRONG_PASSWORD: &str = "wrongpass";

/// A username/password pair sent as HTTP Basic auth.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credential {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credential {
    /// Creates a new credential.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Same username with a password that is guaranteed to differ from this one.
    #[must_use]
    pub fn with_wrong_password(&self) -> Self {
        let mut password = WRONG_PASSWORD.to_string();
        while password == self.password {
            password.push('!');
        }
        Self::new(self.username.clone(), password)
    }

    /// Checks that the username is present.
    ///
    /// Empty passwords are allowed; some test servers run without one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredential`] for a blank username.
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::InvalidCredential(
                "username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
