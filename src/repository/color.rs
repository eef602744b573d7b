use diesel::prelude::*;

use crate::domain::color::ColorOption;
use crate::models::color::Color as DbColor;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ColorListQuery, ColorReader, ColorWriter, DieselRepository};

impl ColorReader for DieselRepository {
    fn list_colors(&self, query: ColorListQuery) -> RepositoryResult<Vec<ColorOption>> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let mut items = colors::table.into_boxed::<diesel::sqlite::Sqlite>();
        if query.in_stock_only {
            items = items.filter(colors::in_stock.eq(true));
        }

        let items = items
            .order((colors::name.asc(), colors::id.asc()))
            .load::<DbColor>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ColorOption>, _>>()?;

        Ok(items)
    }
}

impl ColorWriter for DieselRepository {
    fn replace_colors(&self, colors_to_store: &[ColorOption]) -> RepositoryResult<usize> {
        use crate::schema::colors;

        let mut conn = self.conn()?;
        let rows: Vec<DbColor> = colors_to_store.iter().map(DbColor::from).collect();

        // Delete and insert share one transaction so a failed insert leaves
        // the previous registry in place.
        let inserted = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(colors::table).execute(conn)?;
            if rows.is_empty() {
                return Ok(0);
            }
            Ok(diesel::insert_into(colors::table)
                .values(&rows)
                .execute(conn)?)
        })?;

        Ok(inserted)
    }
}
