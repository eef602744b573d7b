use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{NewOrder, OrderLine, OrderStatusUpdate};
use crate::domain::types::{
    BuyerContact, BuyerName, CatalogItemId, ColorName, ItemName, OrderId, OrderTotal,
    TypeConstraintError,
};

/// One cart entry as posted by the storefront.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemForm {
    #[serde(default)]
    pub toy_id: String,
    #[serde(default)]
    pub toy_name: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Body of `POST /order`.
///
/// Missing strings and lists deserialize as empty so they are reported as
/// missing fields rather than as malformed JSON.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub items: Vec<OrderItemForm>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub buyer_name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub buyer_contact: String,
    #[validate(required)]
    pub total: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated cart ready to become an order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOrderPayload {
    pub buyer_name: BuyerName,
    pub buyer_contact: BuyerContact,
    pub items: Vec<OrderLine>,
    pub total: OrderTotal,
    pub notes: Option<String>,
}

impl SubmitOrderPayload {
    /// Assign a fresh id and the intake timestamp.
    pub fn into_new_order(self) -> NewOrder {
        NewOrder {
            id: OrderId::generate(),
            buyer_name: self.buyer_name,
            buyer_contact: self.buyer_contact,
            items: self.items,
            total: self.total,
            notes: self.notes,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitOrderFormError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid order: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SubmitOrderFormError {
    fn from(_: ValidationErrors) -> Self {
        Self::MissingFields
    }
}

impl From<TypeConstraintError> for SubmitOrderFormError {
    fn from(value: TypeConstraintError) -> Self {
        match value {
            TypeConstraintError::EmptyString(_) => Self::MissingFields,
            other => Self::TypeConstraint(other.to_string()),
        }
    }
}

impl TryFrom<OrderItemForm> for OrderLine {
    type Error = SubmitOrderFormError;

    fn try_from(value: OrderItemForm) -> Result<Self, Self::Error> {
        if value.colors.is_empty() {
            return Err(SubmitOrderFormError::MissingFields);
        }
        Ok(Self {
            toy_id: CatalogItemId::new(value.toy_id)?,
            toy_name: ItemName::new(value.toy_name)?,
            colors: value
                .colors
                .into_iter()
                .map(ColorName::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl TryFrom<SubmitOrderForm> for SubmitOrderPayload {
    type Error = SubmitOrderFormError;

    fn try_from(value: SubmitOrderForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let total = value.total.ok_or(SubmitOrderFormError::MissingFields)?;

        Ok(Self {
            buyer_name: BuyerName::new(value.buyer_name)?,
            buyer_contact: BuyerContact::new(value.buyer_contact)?,
            items: value
                .items
                .into_iter()
                .map(OrderLine::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            total: OrderTotal::new(total)?,
            notes: value
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}

/// Body of `PUT /admin/orders`. Absent flags are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrderStatusPayload {
    pub id: OrderId,
    pub update: OrderStatusUpdate,
}

/// Body of `DELETE /admin/orders`.
#[derive(Debug, Deserialize)]
pub struct DeleteOrderForm {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOrderPayload {
    pub id: OrderId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderIdFormError {
    #[error("Order ID required")]
    MissingId,
}

fn order_id(value: Option<String>) -> Result<OrderId, OrderIdFormError> {
    value
        .and_then(|id| OrderId::new(id).ok())
        .ok_or(OrderIdFormError::MissingId)
}

impl TryFrom<UpdateOrderStatusForm> for UpdateOrderStatusPayload {
    type Error = OrderIdFormError;

    fn try_from(value: UpdateOrderStatusForm) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order_id(value.id)?,
            update: OrderStatusUpdate {
                is_completed: value.is_completed,
                is_paid: value.is_paid,
            },
        })
    }
}

impl TryFrom<DeleteOrderForm> for DeleteOrderPayload {
    type Error = OrderIdFormError;

    fn try_from(value: DeleteOrderForm) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order_id(value.id)?,
        })
    }
}
