use std::{error::Error, sync::Arc};

use actix_web::{web, App, HttpServer};
use log::info;
use wellcheck_api::{config::ServerConfig, session::SessionSettings};
use wellcheck_db::{
    connection::Connection,
    session::{SessionRepository, SessionRepositoryImpl},
    user::{UserRepository, UserRepositoryImpl},
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    let config = ServerConfig::from_env()?;

    info!("Connecting to database");
    let conn = Connection::establish().await?;
    let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(conn.clone()));
    let sessions: Arc<dyn SessionRepository> = Arc::new(SessionRepositoryImpl::new(conn));
    let settings = SessionSettings {
        ttl: config.session_ttl,
    };

    info!(
        "Listening on {}:{}",
        config.bind_address, config.bind_port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(users.clone()))
            .app_data(web::Data::from(sessions.clone()))
            .app_data(web::Data::new(settings))
            .configure(wellcheck_api::configure)
    })
    .bind((config.bind_address.as_str(), config.bind_port))?
    .run()
    .await?;

    Ok(())
}
