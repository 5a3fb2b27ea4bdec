pub mod auth;
pub mod calculator;
pub mod quiz;
