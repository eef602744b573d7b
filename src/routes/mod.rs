use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod catalog;
pub mod colors;
pub mod orders;
pub mod session;
pub mod upload;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

pub fn success() -> HttpResponse {
    HttpResponse::Ok().json(SuccessBody { success: true })
}

/// Map a service failure to its JSON error response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorBody::new("Unauthorized"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("Not found")),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorBody::new(message)),
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

/// JSON extractor settings: unreadable bodies answer `400 {"error": "Invalid data"}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorBody::new("Invalid data")),
        )
        .into()
    })
}

/// Register every storefront and admin endpoint.
///
/// Expects `DieselRepository`, `CatalogCache`, `EmailNotifier`,
/// `LocalObjectStore`, `AdminConfig` and `OperatorConfig` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(catalog::show_catalog)
        .service(colors::show_colors)
        .service(orders::submit_order)
        .service(session::login)
        .service(session::session_status)
        .service(session::logout)
        .service(catalog::show_admin_catalog)
        .service(catalog::create_catalog_item)
        .service(catalog::update_catalog)
        .service(catalog::delete_catalog_item)
        .service(colors::show_admin_colors)
        .service(colors::create_colors)
        .service(colors::replace_colors)
        .service(orders::show_orders)
        .service(orders::update_order_status)
        .service(orders::delete_order)
        .service(upload::upload_image);
}
