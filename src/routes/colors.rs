use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::auth::RequireAdmin;
use crate::domain::session::AdminSession;
use crate::dto::colors::ColorListDto;
use crate::forms::colors::{ReplaceColorsForm, ReplaceColorsPayload};
use crate::repository::DieselRepository;
use crate::routes::{error_response, success};
use crate::services::ServiceError;
use crate::services::colors::{
    replace_colors as replace_colors_service, show_admin_colors as show_admin_colors_service,
    show_public_colors as show_public_colors_service,
};

#[get("/colors")]
pub async fn show_colors(repo: web::Data<DieselRepository>) -> impl Responder {
    match show_public_colors_service(repo.get_ref()) {
        Ok(colors) => HttpResponse::Ok().json(ColorListDto { colors }),
        Err(_) => HttpResponse::InternalServerError().json(ColorListDto { colors: vec![] }),
    }
}

#[get("/admin/colors")]
pub async fn show_admin_colors(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_admin_colors_service(&session, repo.get_ref()) {
        Ok(colors) => HttpResponse::Ok().json(ColorListDto { colors }),
        Err(err) => error_response(err),
    }
}

fn save_colors(
    session: AdminSession,
    repo: &DieselRepository,
    form: ReplaceColorsForm,
) -> HttpResponse {
    let payload: ReplaceColorsPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match replace_colors_service(payload, &session, repo) {
        Ok(_) => success(),
        Err(err) => error_response(err),
    }
}

#[post("/admin/colors")]
pub async fn create_colors(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReplaceColorsForm>,
) -> impl Responder {
    save_colors(session, repo.get_ref(), form)
}

#[put("/admin/colors")]
pub async fn replace_colors(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReplaceColorsForm>,
) -> impl Responder {
    save_colors(session, repo.get_ref(), form)
}
