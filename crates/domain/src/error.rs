use thiserror::Error;

/// Domain-level errors
///
/// These travel inside response payloads as the "embedded" error channel and
/// are promoted to HTTP status codes only at the transport boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid email format")]
    InvalidEmail,

    #[error("password length is short")]
    ShortPassword,

    #[error("invalid mac address")]
    InvalidMacAddress,

    #[error("invalid node type")]
    InvalidNodeType,

    #[error("bad request body, make sure all details are there")]
    BadBodyRequest,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("user not updated")]
    UserNotUpdated,

    #[error("node not found")]
    NodeNotFound,

    #[error("region not found")]
    RegionNotFound,

    #[error("entity already exists: {0}")]
    AlreadyExists(String),

    #[error("generating id failed: {0}")]
    IdGeneration(String),

    #[error("hashing password failed: {0}")]
    Hashing(String),

    #[error("database error: {0}")]
    Storage(String),

    /// An error received from a remote registry, known only by its message.
    #[error("{0}")]
    Remote(String),
}

impl DomainError {
    /// True for lookups that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::UserNotFound | DomainError::NodeNotFound | DomainError::RegionNotFound
        )
    }

    /// True for errors caused by caller input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidEmail
                | DomainError::ShortPassword
                | DomainError::InvalidMacAddress
                | DomainError::InvalidNodeType
                | DomainError::BadBodyRequest
        )
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
