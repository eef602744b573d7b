use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CatalogItemId, Difficulty, ImageRef, ItemName, LicenseStatus, PrintHours, SourceUrl, Tag,
};

/// Fallback build time applied when a new item does not specify one.
pub const DEFAULT_PRINT_HOURS: f64 = 2.0;

/// A made-to-order item shown in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub image_url: Option<ImageRef>,
    pub source_url: Option<SourceUrl>,
    pub tags: Vec<Tag>,
    pub difficulty: Option<Difficulty>,
    pub print_time_hours: Option<PrintHours>,
    pub license_status: LicenseStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CatalogItem {
    /// Whether the item may appear in the public catalog.
    pub fn is_public(&self) -> bool {
        !self.license_status.is_restricted()
    }
}

/// Data required to insert a new [`CatalogItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCatalogItem {
    pub id: CatalogItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub image_url: Option<ImageRef>,
    pub source_url: Option<SourceUrl>,
    pub tags: Vec<Tag>,
    pub difficulty: Difficulty,
    pub print_time_hours: PrintHours,
    pub license_status: LicenseStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Admin edit of the text fields of an existing item.
///
/// The name is always overwritten. For the optional fields the outer `None`
/// leaves the stored value alone and `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItemUpdate {
    pub id: CatalogItemId,
    pub name: ItemName,
    pub description: Option<Option<String>>,
    pub image_url: Option<Option<ImageRef>>,
}
