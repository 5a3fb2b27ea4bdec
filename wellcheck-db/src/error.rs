#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database configuration error: {0}")]
    Configuration(String),
    #[error("record already exists")]
    Conflict,
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
