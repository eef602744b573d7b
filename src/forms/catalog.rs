use chrono::Utc;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::catalog::{CatalogItemUpdate, DEFAULT_PRINT_HOURS, NewCatalogItem};
use crate::domain::types::{
    CatalogItemId, Difficulty, ImageRef, ItemName, LicenseStatus, PrintHours, SourceUrl, Tag,
    TypeConstraintError,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /admin/catalog`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogItemForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub print_time_hours: Option<f64>,
    #[serde(default)]
    pub license_status: Option<String>,
}

/// Validated new item. Unset optional metadata falls back to fixed defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCatalogItemPayload {
    pub id: Option<CatalogItemId>,
    pub name: ItemName,
    pub description: Option<String>,
    pub image_url: Option<ImageRef>,
    pub source_url: Option<SourceUrl>,
    pub tags: Vec<Tag>,
    pub difficulty: Option<Difficulty>,
    pub print_time_hours: Option<PrintHours>,
    pub license_status: Option<LicenseStatus>,
}

impl CreateCatalogItemPayload {
    pub fn into_new_catalog_item(self) -> Result<NewCatalogItem, TypeConstraintError> {
        let now = Utc::now().naive_utc();
        let print_time_hours = match self.print_time_hours {
            Some(hours) => hours,
            None => PrintHours::new(DEFAULT_PRINT_HOURS)?,
        };

        Ok(NewCatalogItem {
            id: self.id.unwrap_or_else(CatalogItemId::generate),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            source_url: self.source_url,
            tags: self.tags,
            difficulty: self.difficulty.unwrap_or_default(),
            print_time_hours,
            license_status: self.license_status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogFormError {
    #[error("Catalog item validation failed: {0}")]
    Validation(String),
    #[error("Catalog item contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CatalogFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CatalogFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCatalogItemForm> for CreateCatalogItemPayload {
    type Error = CatalogFormError;

    fn try_from(value: CreateCatalogItemForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            id: non_blank(value.id).map(CatalogItemId::new).transpose()?,
            name: ItemName::new(value.name)?,
            description: non_blank(value.description),
            image_url: non_blank(value.image_url).map(ImageRef::new).transpose()?,
            source_url: non_blank(value.source_url)
                .map(SourceUrl::new)
                .transpose()?,
            tags: value
                .tags
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .map(Tag::new)
                .collect::<Result<Vec<_>, _>>()?,
            difficulty: non_blank(value.difficulty)
                .map(Difficulty::try_from)
                .transpose()?,
            print_time_hours: value.print_time_hours.map(PrintHours::new).transpose()?,
            license_status: non_blank(value.license_status)
                .map(LicenseStatus::try_from)
                .transpose()?,
        })
    }
}

/// One entry of the `PUT /admin/catalog` batch.
///
/// Every field is optional at the JSON level so that one bad entry is
/// rejected on its own instead of failing the whole batch. An omitted
/// `description` or `imageUrl` keeps the stored value; `null` or a blank
/// string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemEditForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

/// Body of `PUT /admin/catalog`.
#[derive(Debug, Deserialize)]
pub struct UpdateCatalogForm {
    pub toys: Vec<CatalogItemEditForm>,
}

impl TryFrom<CatalogItemEditForm> for CatalogItemUpdate {
    type Error = CatalogFormError;

    fn try_from(value: CatalogItemEditForm) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CatalogItemId::new(value.id.unwrap_or_default())?,
            name: ItemName::new(value.name.unwrap_or_default())?,
            description: value.description.map(non_blank),
            image_url: value
                .image_url
                .map(|image| non_blank(image).map(ImageRef::new).transpose())
                .transpose()?,
        })
    }
}

/// Body of `DELETE /admin/catalog`.
#[derive(Debug, Deserialize)]
pub struct DeleteCatalogItemForm {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCatalogItemPayload {
    pub id: CatalogItemId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeleteCatalogItemFormError {
    #[error("Toy ID required")]
    MissingId,
}

impl TryFrom<DeleteCatalogItemForm> for DeleteCatalogItemPayload {
    type Error = DeleteCatalogItemFormError;

    fn try_from(value: DeleteCatalogItemForm) -> Result<Self, Self::Error> {
        let id = non_blank(value.id)
            .and_then(|id| CatalogItemId::new(id).ok())
            .ok_or(DeleteCatalogItemFormError::MissingId)?;
        Ok(Self { id })
    }
}
