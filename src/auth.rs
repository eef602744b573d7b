//! Cookie-based admin session.
//!
//! A successful login sets [`ADMIN_SESSION_COOKIE`] to a fixed marker value;
//! every request then gets an [`AdminSession`] extracted from that cookie.
//! Admin endpoints take [`RequireAdmin`] instead, which turns an anonymous
//! request away before its body is read.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::session::AdminSession;
use crate::models::config::AdminConfig;
use crate::routes::error_response;
use crate::services::ServiceError;

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";
pub const ADMIN_SESSION_VALUE: &str = "authenticated";
const SESSION_HOURS: i64 = 24;

fn session_of(req: &HttpRequest) -> AdminSession {
    let authenticated = req
        .cookie(ADMIN_SESSION_COOKIE)
        .is_some_and(|cookie| cookie.value() == ADMIN_SESSION_VALUE);
    AdminSession::new(authenticated)
}

impl FromRequest for AdminSession {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(session_of(req)))
    }
}

/// An authenticated [`AdminSession`].
///
/// Extraction fails with `401 {"error": "Unauthorized"}`. List it before any
/// body extractor so anonymous callers never reach body parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireAdmin(pub AdminSession);

impl FromRequest for RequireAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = session_of(req);
        if session.is_authenticated() {
            ready(Ok(Self(session)))
        } else {
            let response = error_response(ServiceError::Unauthorized);
            ready(Err(InternalError::from_response("unauthorized", response).into()))
        }
    }
}

/// Cookie that marks the browser as logged in for the next 24 hours.
pub fn login_cookie(config: &AdminConfig) -> Cookie<'static> {
    Cookie::build(ADMIN_SESSION_COOKIE, ADMIN_SESSION_VALUE)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(Duration::hours(SESSION_HOURS))
        .finish()
}

/// Expired cookie that clears the session in the browser.
pub fn logout_cookie(config: &AdminConfig) -> Cookie<'static> {
    Cookie::build(ADMIN_SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(Duration::ZERO)
        .finish()
}
