use chrono::Utc;
use diesel::prelude::*;

use crate::domain::order::{NewOrder, Order, OrderStatusUpdate};
use crate::domain::types::OrderId;
use crate::models::order::{NewOrder as DbNewOrder, Order as DbOrder, OrderStatusChangeset};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OrderReader, OrderWriter};

impl OrderReader for DieselRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let items = orders::table
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Order>, _>>()?;

        Ok(items)
    }

    fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let order = orders::table
            .filter(orders::id.eq(id.as_str()))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let order = order.map(TryInto::try_into).transpose()?;
        Ok(order)
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_order = DbNewOrder::try_from(order)?;

        let stored = diesel::insert_into(orders::table)
            .values(db_order)
            .get_result::<DbOrder>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_order_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let changeset = OrderStatusChangeset {
            is_completed: update.is_completed,
            is_paid: update.is_paid,
            updated_at: Utc::now().naive_utc(),
        };

        let affected = diesel::update(orders::table.filter(orders::id.eq(id.as_str())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_order(&self, id: &OrderId) -> RepositoryResult<usize> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(orders::table.filter(orders::id.eq(id.as_str()))).execute(&mut conn)?;

        Ok(affected)
    }
}
