use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use crate::{connection::Connection, DbError};

#[mockall::automock]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, DbError>;
    async fn find_user_id(&self, token: &str, now: DateTime<Utc>)
        -> Result<Option<i64>, DbError>;
    async fn delete_session(&self, token: &str) -> Result<(), DbError>;
}

#[derive(Clone)]
pub struct SessionRepositoryImpl {
    connection: Connection,
}

impl SessionRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn create_session(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, DbError> {
        let token = Uuid::new_v4().to_string();
        let mut conn = self.connection.lock().await;

        debug!("Removing expired sessions");
        sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&mut *conn)
            .await?;

        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(user_id)
            .bind(expires_at.timestamp())
            .execute(&mut *conn)
            .await?;

        Ok(token)
    }

    async fn find_user_id(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, DbError> {
        let mut conn = self.connection.lock().await;
        let user_id: Option<i64> =
            sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = ? AND expires_at > ?")
                .bind(token)
                .bind(now.timestamp())
                .fetch_optional(&mut *conn)
                .await?;

        Ok(user_id)
    }

    async fn delete_session(&self, token: &str) -> Result<(), DbError> {
        let mut conn = self.connection.lock().await;
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
