use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{DomainError, User, UserGroup, UserRepository};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{insert_error, storage_error};

const SELECT_USER: &str =
    "SELECT id, name, email, password, user_group, region, created FROM users";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> User {
        let group: Option<i32> = row.get("user_group");
        let created: Option<DateTime<Utc>> = row.get("created");
        User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password: row.get("password"),
            group: group.and_then(|code| UserGroup::from_code(code.into())),
            region: row.get("region"),
            created,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &str) -> Result<User, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref()
            .map(Self::row_to_user)
            .ok_or(DomainError::UserNotFound)
    }

    async fn add(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, user_group, region, created)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.group.map(|g| g.code()))
        .bind(&user.region)
        .bind(user.created.unwrap_or_else(Utc::now))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, &format!("user with email {}", user.email)))?;

        tracing::debug!(id = %user.id, "user stored");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created, id", SELECT_USER))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    async fn update(&self, id: &str, user: &User) -> Result<User, DomainError> {
        let region = user.region.as_str();
        let group = user.group.map(|g| g.code());

        let query = match (region.is_empty(), group) {
            (false, Some(group)) => Some(
                sqlx::query("UPDATE users SET user_group = $2, region = $3 WHERE id = $1")
                    .bind(id)
                    .bind(group)
                    .bind(region),
            ),
            (false, None) => Some(
                sqlx::query("UPDATE users SET region = $2 WHERE id = $1")
                    .bind(id)
                    .bind(region),
            ),
            (true, Some(group)) => Some(
                sqlx::query("UPDATE users SET user_group = $2 WHERE id = $1")
                    .bind(id)
                    .bind(group),
            ),
            (true, None) => None,
        };

        let Some(query) = query else {
            return self.get(id).await;
        };

        let result = query.execute(&self.pool).await.map_err(storage_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }

        // Deleted between the update and the read back.
        match self.get(id).await {
            Err(DomainError::UserNotFound) => Err(DomainError::UserNotUpdated),
            other => other,
        }
    }
}
