#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    #[error("malformed input: {0}")]
    Malformed(String),
}
