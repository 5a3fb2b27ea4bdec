pub mod config;
pub mod error;
pub mod routes;
pub mod session;

use actix_web::web;
use wellcheck_model::error::InvalidInputError;

use crate::error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        ApiError::from(InvalidInputError::Malformed(err.to_string())).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _| {
        ApiError::from(InvalidInputError::Malformed(err.to_string())).into()
    }))
    .service(routes::auth::index)
    .service(routes::auth::register)
    .service(routes::auth::login)
    .service(routes::auth::dashboard)
    .service(routes::auth::logout)
    .service(routes::quiz::result)
    .service(routes::calculator::calculate);
}
