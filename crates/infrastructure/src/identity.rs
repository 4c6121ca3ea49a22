//! Id generation and password hashing backends.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use domain::{DomainError, IdProvider, PasswordHasher};

/// Random v4 UUIDs rendered in their hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn id(&self) -> Result<String, DomainError> {
        Ok(uuid::Uuid::new_v4().to_string())
    }
}

/// Argon2id hashes in PHC string format, salted per password.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Hashing(e.to_string()))
    }

    fn verify(&self, hash: &str, password: &str) -> Result<(), DomainError> {
        // A stored value that is not a PHC string can never match.
        let parsed = PasswordHash::new(hash).map_err(|_| DomainError::InvalidCredentials)?;
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| DomainError::InvalidCredentials)
    }
}
