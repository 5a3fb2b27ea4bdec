pub mod connection;
pub mod error;
pub mod session;
pub mod user;

pub use error::DbError;
