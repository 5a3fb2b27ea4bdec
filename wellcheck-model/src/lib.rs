pub mod error;
pub mod metabolic;
#[cfg(feature = "serde")]
pub mod payload;
pub mod quiz;
