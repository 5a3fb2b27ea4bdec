use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use wellcheck_db::{session::SessionRepository, user::UserRepository};
use wellcheck_model::error::InvalidInputError;

use crate::{
    error::ApiError,
    session::{
        current_user, redirect, removal_cookie, session_cookie, SessionSettings, SESSION_COOKIE,
    },
};

#[derive(Deserialize)]
pub struct Credentials {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub user_id: i64,
}

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/login")
}

#[post("/register")]
pub async fn register(
    form: web::Form<Credentials>,
    users: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let Credentials { username, password } = form.into_inner();
    let username = username.trim();
    if username.is_empty() {
        return Err(InvalidInputError::MissingField("username").into());
    }
    if password.is_empty() {
        return Err(InvalidInputError::MissingField("password").into());
    }

    let password_hash = web::block(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user_id = users.create_user(username, &password_hash).await?;
    info!("Registered user {} with id {}", username, user_id);
    Ok(redirect("/login"))
}

#[post("/login")]
pub async fn login(
    form: web::Form<Credentials>,
    users: web::Data<dyn UserRepository>,
    sessions: web::Data<dyn SessionRepository>,
    settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, ApiError> {
    let Credentials { username, password } = form.into_inner();
    let username = username.trim();
    let Some(user) = users.find_by_username(username).await? else {
        warn!("Login attempt for unknown user {}", username);
        return Err(ApiError::InvalidCredentials);
    };

    let password_hash = user.password_hash.clone();
    let is_valid = web::block(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !is_valid {
        warn!("Invalid password for user {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = sessions
        .create_session(user.id, Utc::now() + settings.ttl)
        .await?;
    info!("User {} logged in", username);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/dashboard"))
        .cookie(session_cookie(token))
        .finish())
}

#[get("/dashboard")]
pub async fn dashboard(
    req: HttpRequest,
    sessions: web::Data<dyn SessionRepository>,
) -> Result<HttpResponse, ApiError> {
    match current_user(&req, sessions.get_ref()).await? {
        Some(user_id) => Ok(HttpResponse::Ok().json(Dashboard { user_id })),
        None => Ok(redirect("/login")),
    }
}

#[get("/logout")]
pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<dyn SessionRepository>,
) -> Result<HttpResponse, ApiError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.delete_session(cookie.value()).await?;
        info!("Session closed");
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(removal_cookie())
        .finish())
}
