use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, post, web};
use serde::Serialize;

use crate::auth::RequireAdmin;
use crate::forms::upload::{UploadImageForm, UploadImagePayload};
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::upload::upload_catalog_image;
use crate::storage::LocalObjectStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadedImage {
    success: bool,
    image_url: String,
    path: String,
}

#[post("/admin/upload")]
pub async fn upload_image(
    RequireAdmin(session): RequireAdmin,
    store: web::Data<LocalObjectStore>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let payload: UploadImagePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match upload_catalog_image(payload, &session, store.get_ref()) {
        Ok(stored) => HttpResponse::Ok().json(UploadedImage {
            success: true,
            image_url: stored.public_url,
            path: stored.path,
        }),
        Err(err) => error_response(err),
    }
}
