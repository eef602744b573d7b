use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BuyerContact, BuyerName, CatalogItemId, ColorName, ItemName, OrderId, OrderTotal,
};

/// One cart entry: the chosen item and its colors, snapshotted at intake.
///
/// Field names follow the storefront cart payload because the list is stored
/// verbatim as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub toy_id: CatalogItemId,
    pub toy_name: ItemName,
    pub colors: Vec<ColorName>,
}

/// A persisted buyer order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub buyer_name: BuyerName,
    pub buyer_contact: BuyerContact,
    pub items: Vec<OrderLine>,
    pub total: OrderTotal,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub is_paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Order`]. Status flags always start false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    pub id: OrderId,
    pub buyer_name: BuyerName,
    pub buyer_contact: BuyerContact,
    pub items: Vec<OrderLine>,
    pub total: OrderTotal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial status change; `None` leaves the flag untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub is_completed: Option<bool>,
    pub is_paid: Option<bool>,
}

impl OrderStatusUpdate {
    pub fn apply(&self, order: &mut Order) {
        if let Some(completed) = self.is_completed {
            order.is_completed = completed;
        }
        if let Some(paid) = self.is_paid {
            order.is_paid = paid;
        }
    }
}
