use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::catalog::{
    CatalogItem as DomainCatalogItem, CatalogItemUpdate as DomainCatalogItemUpdate,
    NewCatalogItem as DomainNewCatalogItem,
};
use crate::domain::types::{
    CatalogItemId, Difficulty, ImageRef, ItemName, LicenseStatus, PrintHours, SourceUrl, Tag,
    TypeConstraintError,
};

/// Diesel model representing the `catalog_items` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::catalog_items)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    /// JSON array of tag strings.
    pub tags: String,
    pub difficulty: Option<String>,
    pub print_time_hours: Option<f64>,
    pub license_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`CatalogItem`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catalog_items)]
pub struct NewCatalogItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub tags: String,
    pub difficulty: Option<String>,
    pub print_time_hours: Option<f64>,
    pub license_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Admin edit of the text fields. An outer `None` skips the column,
/// `Some(None)` stores `NULL`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::catalog_items)]
pub struct CatalogItemChangeset {
    pub name: String,
    pub description: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<CatalogItem> for DomainCatalogItem {
    type Error = TypeConstraintError;

    fn try_from(item: CatalogItem) -> Result<Self, Self::Error> {
        let tags: Vec<Tag> = serde_json::from_str(&item.tags)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("tags: {e}")))?;

        Ok(Self {
            id: CatalogItemId::new(item.id)?,
            name: ItemName::new(item.name)?,
            description: blank_to_none(item.description),
            image_url: blank_to_none(item.image_url).map(ImageRef::new).transpose()?,
            source_url: blank_to_none(item.source_url)
                .map(SourceUrl::new)
                .transpose()?,
            tags,
            difficulty: item
                .difficulty
                .as_deref()
                .map(Difficulty::try_from)
                .transpose()?,
            print_time_hours: item.print_time_hours.map(PrintHours::new).transpose()?,
            license_status: LicenseStatus::try_from(item.license_status.as_str())?,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl TryFrom<&DomainNewCatalogItem> for NewCatalogItem {
    type Error = serde_json::Error;

    fn try_from(item: &DomainNewCatalogItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.as_str().to_string(),
            name: item.name.as_str().to_string(),
            description: item.description.clone(),
            image_url: item.image_url.as_ref().map(|i| i.as_str().to_string()),
            source_url: item.source_url.as_ref().map(|u| u.as_str().to_string()),
            tags: serde_json::to_string(&item.tags)?,
            difficulty: Some(item.difficulty.as_str().to_string()),
            print_time_hours: Some(item.print_time_hours.get()),
            license_status: item.license_status.as_str().to_string(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl CatalogItemChangeset {
    pub fn new(update: &DomainCatalogItemUpdate, updated_at: NaiveDateTime) -> Self {
        Self {
            name: update.name.as_str().to_string(),
            description: update.description.clone(),
            image_url: update
                .image_url
                .as_ref()
                .map(|image| image.as_ref().map(|i| i.as_str().to_string())),
            updated_at,
        }
    }
}
