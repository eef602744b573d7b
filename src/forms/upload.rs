use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::types::CatalogItemId;

/// Multipart body of `POST /admin/upload`.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "10MB")]
    pub file: Option<TempFile>,
    #[multipart(rename = "toyId")]
    pub toy_id: Option<Text<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImagePayload {
    pub toy_id: CatalogItemId,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadImageFormError {
    #[error("File and toyId are required")]
    MissingFields,
    #[error("Failed to read uploaded file")]
    ReadFailed,
}

impl From<std::io::Error> for UploadImageFormError {
    fn from(_: std::io::Error) -> Self {
        Self::ReadFailed
    }
}

impl TryFrom<UploadImageForm> for UploadImagePayload {
    type Error = UploadImageFormError;

    fn try_from(value: UploadImageForm) -> Result<Self, Self::Error> {
        let (Some(file), Some(toy_id)) = (value.file, value.toy_id) else {
            return Err(UploadImageFormError::MissingFields);
        };
        let toy_id = CatalogItemId::new(toy_id.into_inner())
            .map_err(|_| UploadImageFormError::MissingFields)?;

        let bytes = std::fs::read(file.file.path())?;

        Ok(Self {
            toy_id,
            file_name: file.file_name.unwrap_or_default(),
            bytes,
        })
    }
}
