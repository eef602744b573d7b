use crate::db::{DbConnection, DbPool};
use crate::domain::catalog::{CatalogItem, CatalogItemUpdate, NewCatalogItem};
use crate::domain::color::ColorOption;
use crate::domain::order::{NewOrder, Order, OrderStatusUpdate};
use crate::domain::types::{CatalogItemId, ImageRef, OrderId};
use crate::repository::errors::RepositoryResult;

pub mod catalog;
pub mod color;
pub mod errors;
pub mod order;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing catalog items.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogListQuery {
    /// Include items whose license status is restricted.
    pub include_restricted: bool,
}

impl CatalogListQuery {
    /// Items a site visitor may see.
    pub fn public() -> Self {
        Self {
            include_restricted: false,
        }
    }

    /// Every item, for the admin panel.
    pub fn all() -> Self {
        Self {
            include_restricted: true,
        }
    }
}

/// Query parameters used when listing colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorListQuery {
    pub in_stock_only: bool,
}

impl ColorListQuery {
    pub fn in_stock() -> Self {
        Self {
            in_stock_only: true,
        }
    }

    pub fn all() -> Self {
        Self {
            in_stock_only: false,
        }
    }
}

/// Read-only operations for catalog items.
pub trait CatalogReader {
    /// List items ordered by name.
    fn list_catalog_items(&self, query: CatalogListQuery) -> RepositoryResult<Vec<CatalogItem>>;
    /// Retrieve an item by its identifier.
    fn get_catalog_item_by_id(&self, id: &CatalogItemId) -> RepositoryResult<Option<CatalogItem>>;
}

/// Write operations for catalog items.
pub trait CatalogWriter {
    /// Persist a new item and return the stored record.
    fn create_catalog_item(&self, item: &NewCatalogItem) -> RepositoryResult<CatalogItem>;
    /// Overwrite name, description and image of one item. Returns affected rows.
    fn update_catalog_item(&self, update: &CatalogItemUpdate) -> RepositoryResult<usize>;
    /// Replace only the image reference of one item. Returns affected rows.
    fn set_catalog_item_image(
        &self,
        id: &CatalogItemId,
        image_url: &ImageRef,
    ) -> RepositoryResult<usize>;
    /// Delete an item. Orders referencing it are left untouched.
    fn delete_catalog_item(&self, id: &CatalogItemId) -> RepositoryResult<usize>;
}

/// Read-only operations for the color registry.
pub trait ColorReader {
    /// List colors ordered by name.
    fn list_colors(&self, query: ColorListQuery) -> RepositoryResult<Vec<ColorOption>>;
}

/// Write operations for the color registry.
pub trait ColorWriter {
    /// Delete every color and insert `colors` as the new registry.
    ///
    /// Implementations must apply both steps atomically.
    fn replace_colors(&self, colors: &[ColorOption]) -> RepositoryResult<usize>;
}

/// Read-only operations for orders.
pub trait OrderReader {
    /// List every order, newest first.
    fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    /// Retrieve an order by its identifier.
    fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;
}

/// Write operations for orders.
pub trait OrderWriter {
    /// Insert a new order with both status flags false.
    ///
    /// Fails with `RepositoryError::Conflict` when the id already exists.
    fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order>;
    /// Apply a partial status change and refresh `updated_at`. Returns affected rows.
    fn update_order_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<usize>;
    /// Permanently delete an order. Returns affected rows.
    fn delete_order(&self, id: &OrderId) -> RepositoryResult<usize>;
}
