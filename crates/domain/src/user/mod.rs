mod email;
mod entity;
mod group;
mod repository;

pub use email::is_email;
pub use entity::{MIN_PASSWORD_LEN, User};
pub use group::UserGroup;
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;
