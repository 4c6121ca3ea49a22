use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::is_email;
use super::group::{UserGroup, lenient};
use crate::identity::{IdProvider, PasswordHasher};
use crate::DomainError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A registry operator.
///
/// Every field is optional on the wire so that partial payloads (updates)
/// decode into the same type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Plaintext on input, hash at rest.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub group: Option<UserGroup>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl User {
    /// Build a new user with a fresh id, a hashed password and the default
    /// `RegionUser` group.
    pub fn create(
        hasher: &dyn PasswordHasher,
        ids: &dyn IdProvider,
        name: &str,
        email: &str,
        password: &str,
        region: &str,
    ) -> Result<Self, DomainError> {
        let id = ids.id()?;

        if !is_email(email) {
            return Err(DomainError::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::ShortPassword);
        }

        let hash = hasher.hash(password)?;

        Ok(Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: hash,
            group: Some(UserGroup::RegionUser),
            region: region.to_string(),
            created: Some(Utc::now()),
        })
    }

    /// Returns an error if the user representation is invalid.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_email(&self.email) {
            return Err(DomainError::InvalidEmail);
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::ShortPassword);
        }
        Ok(())
    }

    /// Copy of the user without its password hash.
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}
