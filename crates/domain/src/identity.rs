use crate::DomainError;

/// Generates unique identifiers for newly created entities.
#[cfg_attr(test, mockall::automock)]
pub trait IdProvider: Send + Sync {
    fn id(&self) -> Result<String, DomainError>;
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `InvalidCredentials` on mismatch.
    fn verify(&self, hash: &str, password: &str) -> Result<(), DomainError>;
}
