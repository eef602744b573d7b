use crate::cache::CatalogCache;
use crate::domain::catalog::CatalogItemUpdate;
use crate::domain::session::AdminSession;
use crate::dto::catalog::CatalogItemDto;
use crate::forms::catalog::{
    CreateCatalogItemPayload, DeleteCatalogItemPayload, UpdateCatalogForm,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{CatalogListQuery, CatalogReader, CatalogWriter};

use super::{ServiceError, ServiceResult};

/// Outcome of a batch catalog edit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogUpdateReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Catalog as shown to visitors: restricted items are never included.
pub fn show_public_catalog<R>(
    repo: &R,
    cache: &CatalogCache,
) -> ServiceResult<Vec<CatalogItemDto>>
where
    R: CatalogReader,
{
    match cache.get_or_refresh(|| repo.list_catalog_items(CatalogListQuery::public())) {
        Ok(items) => Ok(items.into_iter().map(CatalogItemDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list catalog items: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_admin_catalog<R>(
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<Vec<CatalogItemDto>>
where
    R: CatalogReader,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_catalog_items(CatalogListQuery::all()) {
        Ok(items) => Ok(items.into_iter().map(CatalogItemDto::admin).collect()),
        Err(e) => {
            log::error!("Failed to list catalog items: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_catalog_item<R>(
    payload: CreateCatalogItemPayload,
    session: &AdminSession,
    repo: &R,
    cache: &CatalogCache,
) -> ServiceResult<CatalogItemDto>
where
    R: CatalogWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    let item = payload.into_new_catalog_item()?;
    match repo.create_catalog_item(&item) {
        Ok(stored) => {
            cache.invalidate();
            log::info!("Catalog item {} created", stored.id);
            Ok(CatalogItemDto::admin(stored))
        }
        Err(RepositoryError::Conflict(detail)) => {
            log::warn!("Rejected duplicate catalog item {}: {detail}", item.id);
            Err(ServiceError::Form(format!(
                "Toy with id {} already exists",
                item.id
            )))
        }
        Err(e) => {
            log::error!("Failed to create catalog item: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Apply a batch of edits, one item at a time.
///
/// Entries that fail validation, point at unknown ids or hit a storage error
/// are logged and skipped; the rest of the batch still runs.
pub fn update_catalog_items<R>(
    form: UpdateCatalogForm,
    session: &AdminSession,
    repo: &R,
    cache: &CatalogCache,
) -> ServiceResult<CatalogUpdateReport>
where
    R: CatalogWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    let mut report = CatalogUpdateReport::default();
    for entry in form.toys {
        let update = match CatalogItemUpdate::try_from(entry) {
            Ok(update) => update,
            Err(e) => {
                log::warn!("Skipping catalog edit: {e}");
                report.skipped += 1;
                continue;
            }
        };

        match repo.update_catalog_item(&update) {
            Ok(0) => {
                log::warn!("Skipping catalog edit for unknown item {}", update.id);
                report.skipped += 1;
            }
            Ok(_) => report.updated += 1,
            Err(e) => {
                log::error!("Failed to update catalog item {}: {e}", update.id);
                report.skipped += 1;
            }
        }
    }

    cache.invalidate();
    log::info!(
        "Catalog batch edit finished: {} updated, {} skipped",
        report.updated,
        report.skipped
    );
    Ok(report)
}

pub fn delete_catalog_item<R>(
    payload: DeleteCatalogItemPayload,
    session: &AdminSession,
    repo: &R,
    cache: &CatalogCache,
) -> ServiceResult<()>
where
    R: CatalogReader + CatalogWriter,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_catalog_item_by_id(&payload.id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get catalog item {}: {e}", payload.id);
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_catalog_item(&payload.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            cache.invalidate();
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete catalog item: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::DateTime;

    use super::*;
    use crate::domain::catalog::CatalogItem;
    use crate::domain::types::{CatalogItemId, ItemName, LicenseStatus};
    use crate::forms::catalog::{CatalogItemEditForm, CreateCatalogItemForm};
    use crate::repository::test::TestRepository;

    fn item(id: &str, name: &str, license_status: LicenseStatus) -> CatalogItem {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        CatalogItem {
            id: CatalogItemId::new(id).unwrap(),
            name: ItemName::new(name).unwrap(),
            description: None,
            image_url: None,
            source_url: None,
            tags: vec![],
            difficulty: None,
            print_time_hours: None,
            license_status,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![
                item("star-bear", "Star Bear Buddy", LicenseStatus::Clear),
                item("pikachu", "Electric Mouse", LicenseStatus::IpRisk),
            ],
            vec![],
            vec![],
        )
    }

    fn edit(id: &str, name: &str) -> CatalogItemEditForm {
        CatalogItemEditForm {
            id: Some(id.into()),
            name: Some(name.into()),
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn public_catalog_hides_restricted_items() {
        let items = show_public_catalog(&repo(), &CatalogCache::disabled()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "star-bear");
        assert!(items[0].license_status.is_none());
    }

    #[test]
    fn admin_catalog_lists_everything() {
        let items = show_admin_catalog(&AdminSession::authenticated(), &repo()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.license_status == Some("ip-risk")));
    }

    #[test]
    fn admin_operations_require_session() {
        let repo = repo();
        let cache = CatalogCache::disabled();
        let anonymous = AdminSession::anonymous();

        assert_eq!(
            show_admin_catalog(&anonymous, &repo),
            Err(ServiceError::Unauthorized)
        );
        assert_eq!(
            update_catalog_items(UpdateCatalogForm { toys: vec![] }, &anonymous, &repo, &cache),
            Err(ServiceError::Unauthorized)
        );
        let payload = DeleteCatalogItemPayload {
            id: CatalogItemId::new("star-bear").unwrap(),
        };
        assert_eq!(
            delete_catalog_item(payload, &anonymous, &repo, &cache),
            Err(ServiceError::Unauthorized)
        );
        assert_eq!(repo.catalog_snapshot().len(), 2);
    }

    #[test]
    fn create_invalidates_public_cache() {
        let repo = repo();
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert_eq!(show_public_catalog(&repo, &cache).unwrap().len(), 1);

        let form: CreateCatalogItemForm =
            serde_json::from_value(serde_json::json!({"id": "octopus", "name": "Octopus"}))
                .unwrap();
        let payload = CreateCatalogItemPayload::try_from(form).unwrap();
        let created =
            create_catalog_item(payload, &AdminSession::authenticated(), &repo, &cache).unwrap();

        assert_eq!(created.difficulty, Some("easy"));
        assert_eq!(created.print_time_hours, Some(2.0));
        assert_eq!(show_public_catalog(&repo, &cache).unwrap().len(), 2);
    }

    #[test]
    fn create_with_existing_id_is_a_form_error() {
        let form: CreateCatalogItemForm =
            serde_json::from_value(serde_json::json!({"id": "star-bear", "name": "Again"}))
                .unwrap();
        let payload = CreateCatalogItemPayload::try_from(form).unwrap();
        let result = create_catalog_item(
            payload,
            &AdminSession::authenticated(),
            &repo(),
            &CatalogCache::disabled(),
        );
        assert_eq!(
            result,
            Err(ServiceError::Form(
                "Toy with id star-bear already exists".to_string()
            ))
        );
    }

    #[test]
    fn batch_update_skips_bad_entries_and_continues() {
        let repo = repo().with_failing_catalog_id("pikachu");
        let form = UpdateCatalogForm {
            toys: vec![
                edit("pikachu", "Mouse"),
                CatalogItemEditForm {
                    id: None,
                    name: None,
                    description: None,
                    image_url: None,
                },
                edit("missing", "Ghost"),
                edit("star-bear", "Star Bear"),
            ],
        };

        let report = update_catalog_items(
            form,
            &AdminSession::authenticated(),
            &repo,
            &CatalogCache::disabled(),
        )
        .unwrap();

        assert_eq!(
            report,
            CatalogUpdateReport {
                updated: 1,
                skipped: 3
            }
        );
        let catalog = repo.catalog_snapshot();
        let bear = catalog.iter().find(|i| i.id == "star-bear").unwrap();
        assert_eq!(bear.name, "Star Bear");
    }

    #[test]
    fn delete_unknown_item_is_not_found() {
        let payload = DeleteCatalogItemPayload {
            id: CatalogItemId::new("missing").unwrap(),
        };
        assert_eq!(
            delete_catalog_item(
                payload,
                &AdminSession::authenticated(),
                &repo(),
                &CatalogCache::disabled()
            ),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn delete_looks_up_the_item_then_removes_it() {
        let repo = repo();
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert_eq!(show_public_catalog(&repo, &cache).unwrap().len(), 1);

        let payload = DeleteCatalogItemPayload {
            id: CatalogItemId::new("star-bear").unwrap(),
        };
        delete_catalog_item(payload, &AdminSession::authenticated(), &repo, &cache).unwrap();

        assert!(repo.catalog_snapshot().iter().all(|i| i.id != "star-bear"));
        assert!(show_public_catalog(&repo, &cache).unwrap().is_empty());

        let payload = DeleteCatalogItemPayload {
            id: CatalogItemId::new("star-bear").unwrap(),
        };
        assert_eq!(
            delete_catalog_item(
                payload,
                &AdminSession::authenticated(),
                &TestRepository::broken(),
                &cache
            ),
            Err(ServiceError::Internal)
        );
    }

    #[test]
    fn storage_failure_is_internal() {
        assert_eq!(
            show_public_catalog(&TestRepository::broken(), &CatalogCache::disabled()),
            Err(ServiceError::Internal)
        );
    }
}
