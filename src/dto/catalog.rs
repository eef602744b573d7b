use serde::Serialize;

use crate::domain::catalog::CatalogItem;

/// Catalog item as the storefront renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<&'static str>,
    pub print_time_hours: Option<f64>,
    /// Only present in admin listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_status: Option<&'static str>,
}

impl CatalogItemDto {
    /// Admin view, which also exposes the license status.
    pub fn admin(item: CatalogItem) -> Self {
        let license_status = item.license_status.as_str();
        Self {
            license_status: Some(license_status),
            ..Self::from(item)
        }
    }
}

impl From<CatalogItem> for CatalogItemDto {
    fn from(value: CatalogItem) -> Self {
        Self {
            id: value.id.into_inner(),
            name: value.name.into_inner(),
            description: value.description,
            image_url: value.image_url.map(|v| v.into_inner()),
            source_url: value.source_url.map(|v| v.into_inner()),
            tags: value.tags.into_iter().map(|t| t.into_inner()).collect(),
            difficulty: value.difficulty.map(|d| d.as_str()),
            print_time_hours: value.print_time_hours.map(|h| h.get()),
            license_status: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogListDto {
    pub toys: Vec<CatalogItemDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CatalogItemId, ItemName, LicenseStatus};
    use chrono::DateTime;

    fn item() -> CatalogItem {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        CatalogItem {
            id: CatalogItemId::new("star-bear").unwrap(),
            name: ItemName::new("Star Bear Buddy").unwrap(),
            description: None,
            image_url: None,
            source_url: None,
            tags: vec![],
            difficulty: None,
            print_time_hours: None,
            license_status: LicenseStatus::IpRisk,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn public_view_hides_license_status() {
        let json = serde_json::to_value(CatalogItemDto::from(item())).unwrap();
        assert!(json.get("licenseStatus").is_none());
        assert_eq!(json["name"], "Star Bear Buddy");
        assert!(json.get("imageUrl").is_some());
    }

    #[test]
    fn admin_view_includes_license_status() {
        let json = serde_json::to_value(CatalogItemDto::admin(item())).unwrap();
        assert_eq!(json["licenseStatus"], "ip-risk");
    }
}
