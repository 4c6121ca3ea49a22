use async_trait::async_trait;
use chrono::Utc;
use domain::{DomainError, User, UserRepository};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &str) -> Result<User, DomainError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn add(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(DomainError::AlreadyExists(format!("user {}", user.id)));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::AlreadyExists(format!(
                "user with email {}",
                user.email
            )));
        }

        let mut user = user.clone();
        user.created.get_or_insert_with(Utc::now);
        users.push(user);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.clone())
    }

    async fn update(&self, id: &str, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound)?;

        if !user.region.is_empty() {
            stored.region = user.region.clone();
        }
        if let Some(group) = user.group {
            stored.group = Some(group);
        }
        Ok(stored.clone())
    }
}
