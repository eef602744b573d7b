use crate::domain::order::Order;
use crate::domain::session::AdminSession;
use crate::dto::orders::OrderDto;
use crate::forms::orders::{DeleteOrderPayload, SubmitOrderPayload, UpdateOrderStatusPayload};
use crate::notifier::OrderNotifier;
use crate::repository::errors::RepositoryError;
use crate::repository::{OrderReader, OrderWriter};

use super::{ServiceError, ServiceResult};

/// Persist a buyer's cart and tell the seller about it.
///
/// The order is stored before anything else happens; if that fails no
/// notification is sent. A failed notification is logged and does not fail
/// the submission.
pub async fn submit_order<R, N>(
    payload: SubmitOrderPayload,
    repo: &R,
    notifier: &N,
) -> ServiceResult<Order>
where
    R: OrderWriter,
    N: OrderNotifier,
{
    let new_order = payload.into_new_order();

    let order = match repo.create_order(&new_order) {
        Ok(order) => order,
        Err(RepositoryError::Conflict(detail)) => {
            log::error!(
                "Generated order id {} already exists, order not saved: {detail}",
                new_order.id
            );
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to save order: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if let Err(e) = notifier.notify(&order).await {
        log::error!("Failed to send notification for order {}: {e}", order.id);
    }

    Ok(order)
}

pub fn list_orders<R>(session: &AdminSession, repo: &R) -> ServiceResult<Vec<OrderDto>>
where
    R: OrderReader,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_orders() {
        Ok(orders) => Ok(orders.into_iter().map(OrderDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list orders: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_order_status<R>(
    payload: UpdateOrderStatusPayload,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<()>
where
    R: OrderReader + OrderWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_order_by_id(&payload.id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get order {}: {e}", payload.id);
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_order_status(&payload.id, &payload.update) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update order {}: {e}", payload.id);
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_order<R>(
    payload: DeleteOrderPayload,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<()>
where
    R: OrderReader + OrderWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_order_by_id(&payload.id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get order {}: {e}", payload.id);
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_order(&payload.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Order {} deleted", payload.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete order {}: {e}", payload.id);
            Err(ServiceError::Internal)
        }
    }
}
