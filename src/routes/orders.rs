use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::RequireAdmin;
use crate::dto::orders::{OrderListDto, OrderReceiptDto};
use crate::forms::orders::{
    DeleteOrderForm, DeleteOrderPayload, SubmitOrderForm, SubmitOrderPayload,
    UpdateOrderStatusForm, UpdateOrderStatusPayload,
};
use crate::models::config::OperatorConfig;
use crate::notifier::EmailNotifier;
use crate::repository::DieselRepository;
use crate::routes::{error_response, success};
use crate::services::ServiceError;
use crate::services::orders::{
    delete_order as delete_order_service, list_orders as list_orders_service,
    submit_order as submit_order_service, update_order_status as update_order_status_service,
};

#[post("/order")]
pub async fn submit_order(
    repo: web::Data<DieselRepository>,
    notifier: web::Data<EmailNotifier>,
    operator: web::Data<OperatorConfig>,
    web::Json(form): web::Json<SubmitOrderForm>,
) -> impl Responder {
    let payload: SubmitOrderPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match submit_order_service(payload, repo.get_ref(), notifier.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(OrderReceiptDto {
            success: true,
            matt_phone: Some(operator.phone.clone()).filter(|phone| !phone.is_empty()),
        }),
        Err(err) => error_response(err),
    }
}

#[get("/admin/orders")]
pub async fn show_orders(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_orders_service(&session, repo.get_ref()) {
        Ok(orders) => HttpResponse::Ok().json(OrderListDto { orders }),
        Err(err) => error_response(err),
    }
}

#[put("/admin/orders")]
pub async fn update_order_status(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateOrderStatusForm>,
) -> impl Responder {
    let payload: UpdateOrderStatusPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_order_status_service(payload, &session, repo.get_ref()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}

#[delete("/admin/orders")]
pub async fn delete_order(
    RequireAdmin(session): RequireAdmin,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<DeleteOrderForm>,
) -> impl Responder {
    let payload: DeleteOrderPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match delete_order_service(payload, &session, repo.get_ref()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}
