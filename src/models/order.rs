use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderLine};
use crate::domain::types::{BuyerContact, BuyerName, OrderId, OrderTotal, TypeConstraintError};

/// Diesel model representing the `orders` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: String,
    pub buyer_name: String,
    pub buyer_contact: String,
    /// JSON array of [`OrderLine`] snapshots.
    pub items: String,
    pub total: f64,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub is_paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Order`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub id: String,
    pub buyer_name: String,
    pub buyer_contact: String,
    pub items: String,
    pub total: f64,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub is_paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Status patch; `None` fields are left out of the `UPDATE`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct OrderStatusChangeset {
    pub is_completed: Option<bool>,
    pub is_paid: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Order> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        let items: Vec<OrderLine> = serde_json::from_str(&order.items)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("order items: {e}")))?;

        Ok(Self {
            id: OrderId::new(order.id)?,
            buyer_name: BuyerName::new(order.buyer_name)?,
            buyer_contact: BuyerContact::new(order.buyer_contact)?,
            items,
            total: OrderTotal::new(order.total)?,
            notes: order.notes,
            is_completed: order.is_completed,
            is_paid: order.is_paid,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

impl TryFrom<&DomainNewOrder> for NewOrder {
    type Error = serde_json::Error;

    fn try_from(order: &DomainNewOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order.id.as_str().to_string(),
            buyer_name: order.buyer_name.as_str().to_string(),
            buyer_contact: order.buyer_contact.as_str().to_string(),
            items: serde_json::to_string(&order.items)?,
            total: order.total.get(),
            notes: order.notes.clone(),
            is_completed: false,
            is_paid: false,
            created_at: order.created_at,
            updated_at: order.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CatalogItemId, ColorName, ItemName};
    use chrono::DateTime;

    #[test]
    fn stores_items_in_cart_shape() {
        let order = DomainNewOrder {
            id: OrderId::new("order-1-1").unwrap(),
            buyer_name: BuyerName::new("Alex").unwrap(),
            buyer_contact: BuyerContact::new("alex@example.com").unwrap(),
            items: vec![OrderLine {
                toy_id: CatalogItemId::new("star-bear").unwrap(),
                toy_name: ItemName::new("Star Bear Buddy").unwrap(),
                colors: vec![ColorName::new("Pink").unwrap()],
            }],
            total: OrderTotal::new(5.0).unwrap(),
            notes: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        };

        let row = NewOrder::try_from(&order).unwrap();
        let items: serde_json::Value = serde_json::from_str(&row.items).unwrap();

        assert_eq!(
            items,
            serde_json::json!([{"toyId": "star-bear", "toyName": "Star Bear Buddy", "colors": ["Pink"]}])
        );
        assert!(!row.is_completed);
        assert!(!row.is_paid);
        assert_eq!(row.created_at, row.updated_at);
    }
}
