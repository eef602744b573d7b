use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Serialize;

use crate::auth::RequireAdmin;
use crate::cache::CatalogCache;
use crate::dto::catalog::{CatalogItemDto, CatalogListDto};
use crate::forms::catalog::{
    CreateCatalogItemForm, CreateCatalogItemPayload, DeleteCatalogItemForm,
    DeleteCatalogItemPayload, UpdateCatalogForm,
};
use crate::repository::DieselRepository;
use crate::routes::{error_response, success};
use crate::services::ServiceError;
use crate::services::catalog::{
    create_catalog_item as create_catalog_item_service,
    delete_catalog_item as delete_catalog_item_service,
    show_admin_catalog as show_admin_catalog_service,
    show_public_catalog as show_public_catalog_service,
    update_catalog_items as update_catalog_items_service,
};

#[derive(Debug, Serialize)]
struct CreatedCatalogItem {
    success: bool,
    toy: CatalogItemDto,
}

#[get("/catalog")]
pub async fn show_catalog(
    repo: web::Data<DieselRepository>,
    cache: web::Data<CatalogCache>,
) -> impl Responder {
    match show_public_catalog_service(repo.get_ref(), cache.get_ref()) {
        Ok(toys) => HttpResponse::Ok().json(CatalogListDto { toys }),
        Err(_) => HttpResponse::InternalServerError().json(CatalogListDto { toys: vec![] }),
    }
}

#[get("/admin/catalog")]
pub async fn show_admin_catalog(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_admin_catalog_service(&session, repo.get_ref()) {
        Ok(toys) => HttpResponse::Ok().json(CatalogListDto { toys }),
        Err(err) => error_response(err),
    }
}

#[post("/admin/catalog")]
pub async fn create_catalog_item(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CatalogCache>,
    web::Json(form): web::Json<CreateCatalogItemForm>,
) -> impl Responder {
    let payload: CreateCatalogItemPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_catalog_item_service(payload, &session, repo.get_ref(), cache.get_ref()) {
        Ok(toy) => HttpResponse::Ok().json(CreatedCatalogItem { success: true, toy }),
        Err(err) => error_response(err),
    }
}

#[put("/admin/catalog")]
pub async fn update_catalog(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CatalogCache>,
    web::Json(form): web::Json<UpdateCatalogForm>,
) -> impl Responder {
    match update_catalog_items_service(form, &session, repo.get_ref(), cache.get_ref()) {
        Ok(_report) => success(),
        Err(err) => error_response(err),
    }
}

#[delete("/admin/catalog")]
pub async fn delete_catalog_item(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CatalogCache>,
    web::Json(form): web::Json<DeleteCatalogItemForm>,
) -> impl Responder {
    let payload: DeleteCatalogItemPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match delete_catalog_item_service(payload, &session, repo.get_ref(), cache.get_ref()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}
