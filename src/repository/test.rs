use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::catalog::{CatalogItem, CatalogItemUpdate, NewCatalogItem};
use crate::domain::color::ColorOption;
use crate::domain::order::{NewOrder, Order, OrderStatusUpdate};
use crate::domain::types::{CatalogItemId, ImageRef, OrderId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CatalogListQuery, CatalogReader, CatalogWriter, ColorListQuery, ColorReader, ColorWriter,
    OrderReader, OrderWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    catalog: Mutex<Vec<CatalogItem>>,
    colors: Mutex<Vec<ColorOption>>,
    orders: Mutex<Vec<Order>>,
    /// Catalog ids whose updates fail with a database error.
    failing_catalog_ids: HashSet<String>,
    /// Every call returns a database error.
    broken: bool,
    /// Every order insert fails as if the generated id already existed.
    order_conflicts: bool,
}

fn broken_error() -> RepositoryError {
    RepositoryError::Database(diesel::result::Error::BrokenTransactionManager)
}

impl TestRepository {
    pub fn new(catalog: Vec<CatalogItem>, colors: Vec<ColorOption>, orders: Vec<Order>) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            colors: Mutex::new(colors),
            orders: Mutex::new(orders),
            ..Default::default()
        }
    }

    /// Repository whose every call fails, for exercising error paths.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn with_failing_catalog_id(mut self, id: &str) -> Self {
        self.failing_catalog_ids.insert(id.to_string());
        self
    }

    pub fn with_order_conflicts(mut self) -> Self {
        self.order_conflicts = true;
        self
    }

    pub fn catalog_snapshot(&self) -> Vec<CatalogItem> {
        self.catalog.lock().unwrap().clone()
    }

    pub fn colors_snapshot(&self) -> Vec<ColorOption> {
        self.colors.lock().unwrap().clone()
    }

    pub fn orders_snapshot(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.broken {
            Err(broken_error())
        } else {
            Ok(())
        }
    }
}

impl CatalogReader for TestRepository {
    fn list_catalog_items(&self, query: CatalogListQuery) -> RepositoryResult<Vec<CatalogItem>> {
        self.check()?;
        let mut items: Vec<CatalogItem> = self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .filter(|i| query.include_restricted || i.is_public())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn get_catalog_item_by_id(&self, id: &CatalogItemId) -> RepositoryResult<Option<CatalogItem>> {
        self.check()?;
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .find(|i| &i.id == id)
            .cloned())
    }
}

impl CatalogWriter for TestRepository {
    fn create_catalog_item(&self, item: &NewCatalogItem) -> RepositoryResult<CatalogItem> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        if catalog.iter().any(|i| i.id == item.id) {
            return Err(RepositoryError::Conflict(
                "UNIQUE constraint failed: catalog_items.id".to_string(),
            ));
        }
        let stored = CatalogItem {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            source_url: item.source_url.clone(),
            tags: item.tags.clone(),
            difficulty: Some(item.difficulty),
            print_time_hours: Some(item.print_time_hours),
            license_status: item.license_status,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        catalog.push(stored.clone());
        Ok(stored)
    }

    fn update_catalog_item(&self, update: &CatalogItemUpdate) -> RepositoryResult<usize> {
        self.check()?;
        if self.failing_catalog_ids.contains(update.id.as_str()) {
            return Err(broken_error());
        }
        let mut catalog = self.catalog.lock().unwrap();
        match catalog.iter_mut().find(|i| i.id == update.id) {
            Some(item) => {
                item.name = update.name.clone();
                if let Some(description) = &update.description {
                    item.description = description.clone();
                }
                if let Some(image_url) = &update.image_url {
                    item.image_url = image_url.clone();
                }
                item.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn set_catalog_item_image(
        &self,
        id: &CatalogItemId,
        image_url: &ImageRef,
    ) -> RepositoryResult<usize> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        match catalog.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.image_url = Some(image_url.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_catalog_item(&self, id: &CatalogItemId) -> RepositoryResult<usize> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        let before = catalog.len();
        catalog.retain(|i| &i.id != id);
        Ok(before - catalog.len())
    }
}

impl ColorReader for TestRepository {
    fn list_colors(&self, query: ColorListQuery) -> RepositoryResult<Vec<ColorOption>> {
        self.check()?;
        let mut items: Vec<ColorOption> = self
            .colors
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !query.in_stock_only || c.in_stock)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

impl ColorWriter for TestRepository {
    fn replace_colors(&self, colors: &[ColorOption]) -> RepositoryResult<usize> {
        self.check()?;
        let mut stored = self.colors.lock().unwrap();
        *stored = colors.to_vec();
        Ok(stored.len())
    }
}

impl OrderReader for TestRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        self.check()?;
        let mut items = self.orders.lock().unwrap().clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        self.check()?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.id == id)
            .cloned())
    }
}

impl OrderWriter for TestRepository {
    fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        if self.order_conflicts || orders.iter().any(|o| o.id == order.id) {
            return Err(RepositoryError::Conflict(
                "UNIQUE constraint failed: orders.id".to_string(),
            ));
        }
        let stored = Order {
            id: order.id.clone(),
            buyer_name: order.buyer_name.clone(),
            buyer_contact: order.buyer_contact.clone(),
            items: order.items.clone(),
            total: order.total,
            notes: order.notes.clone(),
            is_completed: false,
            is_paid: false,
            created_at: order.created_at,
            updated_at: order.created_at,
        };
        orders.push(stored.clone());
        Ok(stored)
    }

    fn update_order_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<usize> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| &o.id == id) {
            Some(order) => {
                update.apply(order);
                order.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_order(&self, id: &OrderId) -> RepositoryResult<usize> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| &o.id != id);
        Ok(before - orders.len())
    }
}
