use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::order::{Order, OrderLine};

/// Cart line inside an admin order listing. Keeps the storefront's field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub toy_id: String,
    pub toy_name: String,
    pub colors: Vec<String>,
}

impl From<OrderLine> for OrderLineDto {
    fn from(value: OrderLine) -> Self {
        Self {
            toy_id: value.toy_id.into_inner(),
            toy_name: value.toy_name.into_inner(),
            colors: value.colors.into_iter().map(|c| c.into_inner()).collect(),
        }
    }
}

/// Order as shown in the admin panel (snake_case fields).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDto {
    pub id: String,
    pub buyer_name: String,
    pub buyer_contact: String,
    pub items: Vec<OrderLineDto>,
    pub total: f64,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub is_paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.into_inner(),
            buyer_name: value.buyer_name.into_inner(),
            buyer_contact: value.buyer_contact.into_inner(),
            items: value.items.into_iter().map(OrderLineDto::from).collect(),
            total: value.total.get(),
            notes: value.notes,
            is_completed: value.is_completed,
            is_paid: value.is_paid,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderListDto {
    pub orders: Vec<OrderDto>,
}

/// Answer to a successful order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceiptDto {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matt_phone: Option<String>,
}
