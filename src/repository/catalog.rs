use chrono::Utc;
use diesel::prelude::*;

use crate::domain::catalog::{CatalogItem, CatalogItemUpdate, NewCatalogItem};
use crate::domain::types::{CatalogItemId, ImageRef, LicenseStatus};
use crate::models::catalog::{
    CatalogItem as DbCatalogItem, CatalogItemChangeset, NewCatalogItem as DbNewCatalogItem,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogListQuery, CatalogReader, CatalogWriter, DieselRepository};

impl CatalogReader for DieselRepository {
    fn list_catalog_items(&self, query: CatalogListQuery) -> RepositoryResult<Vec<CatalogItem>> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let mut items = catalog_items::table.into_boxed::<diesel::sqlite::Sqlite>();
        if !query.include_restricted {
            items = items.filter(catalog_items::license_status.ne(LicenseStatus::IpRisk.as_str()));
        }

        let items = items
            .order((catalog_items::name.asc(), catalog_items::id.asc()))
            .load::<DbCatalogItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CatalogItem>, _>>()?;

        Ok(items)
    }

    fn get_catalog_item_by_id(&self, id: &CatalogItemId) -> RepositoryResult<Option<CatalogItem>> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let item = catalog_items::table
            .filter(catalog_items::id.eq(id.as_str()))
            .first::<DbCatalogItem>(&mut conn)
            .optional()?;

        let item = item.map(TryInto::try_into).transpose()?;
        Ok(item)
    }
}

impl CatalogWriter for DieselRepository {
    fn create_catalog_item(&self, item: &NewCatalogItem) -> RepositoryResult<CatalogItem> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;
        let db_item = DbNewCatalogItem::try_from(item)?;

        let stored = diesel::insert_into(catalog_items::table)
            .values(db_item)
            .get_result::<DbCatalogItem>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_catalog_item(&self, update: &CatalogItemUpdate) -> RepositoryResult<usize> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;
        let changeset = CatalogItemChangeset::new(update, Utc::now().naive_utc());

        let affected =
            diesel::update(catalog_items::table.filter(catalog_items::id.eq(update.id.as_str())))
                .set(changeset)
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_catalog_item_image(
        &self,
        id: &CatalogItemId,
        image_url: &ImageRef,
    ) -> RepositoryResult<usize> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let target = catalog_items::table.filter(catalog_items::id.eq(id.as_str()));
        let affected = diesel::update(target)
            .set((
                catalog_items::image_url.eq(image_url.as_str()),
                catalog_items::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_catalog_item(&self, id: &CatalogItemId) -> RepositoryResult<usize> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(catalog_items::table.filter(catalog_items::id.eq(id.as_str())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
