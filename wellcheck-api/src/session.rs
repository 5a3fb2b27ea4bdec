use actix_web::{
    cookie::{Cookie, SameSite},
    http::header,
    HttpRequest, HttpResponse,
};
use chrono::{Duration, Utc};
use wellcheck_db::session::SessionRepository;

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub ttl: Duration,
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Resolves the logged in user from the session cookie, if any.
pub async fn current_user(
    req: &HttpRequest,
    sessions: &dyn SessionRepository,
) -> Result<Option<i64>, ApiError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };
    Ok(sessions.find_user_id(cookie.value(), Utc::now()).await?)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
