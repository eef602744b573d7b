use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Serialize;

use crate::auth::{login_cookie, logout_cookie};
use crate::domain::session::AdminSession;
use crate::forms::session::LoginForm;
use crate::models::config::AdminConfig;
use crate::routes::{ErrorBody, SuccessBody};
use crate::services::session::{login as login_service, session_status as session_status_service};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatus {
    logged_in: bool,
}

#[post("/admin/login")]
pub async fn login(
    config: web::Data<AdminConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    match login_service(&form, &config.password) {
        Ok(_) => HttpResponse::Ok()
            .cookie(login_cookie(config.get_ref()))
            .json(SuccessBody { success: true }),
        Err(_) => HttpResponse::Unauthorized().json(ErrorBody::new("Invalid password")),
    }
}

#[get("/admin/session")]
pub async fn session_status(session: AdminSession) -> impl Responder {
    HttpResponse::Ok().json(SessionStatus {
        logged_in: session_status_service(&session),
    })
}

#[post("/admin/logout")]
pub async fn logout(config: web::Data<AdminConfig>) -> impl Responder {
    HttpResponse::Ok()
        .cookie(logout_cookie(config.get_ref()))
        .json(SuccessBody { success: true })
}
