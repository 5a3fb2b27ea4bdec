use async_trait::async_trait;
use log::debug;

use crate::{connection::Connection, DbError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DbError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
}

#[derive(Clone)]
pub struct UserRepositoryImpl {
    connection: Connection,
}

impl UserRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DbError> {
        let mut conn = self.connection.lock().await;
        debug!("Storing user {}", username);
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                    DbError::Conflict
                }
                e => DbError::Sqlx(e),
            })?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.connection.lock().await;
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(row.map(|(id, username, password_hash)| User {
            id,
            username,
            password_hash,
        }))
    }
}
