use chrono::Utc;

use crate::domain::session::AdminSession;
use crate::forms::upload::UploadImagePayload;
use crate::storage::{ObjectStore, StoredObject, extension_or_default, slugify};

use super::{ServiceError, ServiceResult};

/// Object key for an uploaded image: `<slug>-<unix millis>.<ext>`.
pub fn upload_key(payload: &UploadImagePayload, millis: i64) -> String {
    format!(
        "{}-{millis}.{}",
        slugify(payload.toy_id.as_str()),
        extension_or_default(&payload.file_name)
    )
}

pub fn upload_catalog_image<S>(
    payload: UploadImagePayload,
    session: &AdminSession,
    store: &S,
) -> ServiceResult<StoredObject>
where
    S: ObjectStore,
{
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }

    let key = upload_key(&payload, Utc::now().timestamp_millis());
    match store.put(&key, &payload.bytes) {
        Ok(stored) => {
            log::info!("Stored image {} for {}", stored.path, payload.toy_id);
            Ok(stored)
        }
        Err(e) => {
            log::error!("Failed to store uploaded image: {e}");
            Err(ServiceError::Internal)
        }
    }
}
