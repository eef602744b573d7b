//! Offline import of catalog images from each item's source page.
//!
//! For every item with a `source_url` the page is fetched, its `og:image`
//! meta tag located and the image copied into the object store. The item's
//! image reference is then pointed at the stored copy.

use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use crate::domain::catalog::CatalogItem;
use crate::domain::types::ImageRef;
use crate::repository::errors::RepositoryError;
use crate::repository::{CatalogListQuery, CatalogReader, CatalogWriter};
use crate::storage::{ObjectStore, StorageError, StoredObject, slugify};

/// Browser-like agent; some model repositories refuse unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Pause between two items.
pub const ITEM_DELAY: Duration = Duration::from_millis(500);

/// Upper bound for one page or image download.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

const OG_IMAGE_PATTERNS: [&str; 2] = [
    r#"(?i)<meta[^>]+property=["']og:image["'][^>]*content=["']([^"']+)["']"#,
    r#"(?i)<meta[^>]+content=["']([^"']+)["'][^>]*property=["']og:image["']"#,
];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("no og:image tag found")]
    NoImage,
    #[error("failed to store image: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to update catalog item: {0}")]
    Repository(#[from] RepositoryError),
}

/// Totals printed at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// URL of the first `og:image` meta tag, whichever attribute comes first.
pub fn extract_og_image(html: &str) -> Option<String> {
    OG_IMAGE_PATTERNS.iter().find_map(|pattern| {
        let re = Regex::new(pattern).ok()?;
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// File extension of an image URL, limited to common web formats.
pub fn image_extension(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS
        .iter()
        .find(|known| **known == ext)
        .copied()
        .unwrap_or("jpg")
}

pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, IngestError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::Status(status.as_u16()));
    }
    Ok(response)
}

/// Copy the `og:image` of one item's source page into `store`.
pub async fn fetch_item_image<S>(
    client: &reqwest::Client,
    store: &S,
    item: &CatalogItem,
    source_url: &str,
) -> Result<StoredObject, IngestError>
where
    S: ObjectStore,
{
    let html = fetch(client, source_url).await?.text().await?;
    let image_url = extract_og_image(&html).ok_or(IngestError::NoImage)?;
    log::debug!("Found image for {}: {image_url}", item.id);

    let bytes = fetch(client, &image_url).await?.bytes().await?;
    let key = format!(
        "{}.{}",
        slugify(item.id.as_str()),
        image_extension(&image_url)
    );
    Ok(store.put(&key, &bytes)?)
}

/// Run the import over every catalog item that has a source page.
///
/// A failure on one item is logged and counted; the run continues.
pub async fn ingest_catalog_images<R, S>(
    repo: &R,
    store: &S,
    client: &reqwest::Client,
    delay: Duration,
) -> Result<IngestReport, RepositoryError>
where
    R: CatalogReader + CatalogWriter,
    S: ObjectStore,
{
    let items = repo.list_catalog_items(CatalogListQuery::all())?;
    let mut report = IngestReport::default();

    let with_source: Vec<_> = items
        .iter()
        .filter_map(|item| item.source_url.as_ref().map(|url| (item, url)))
        .collect();
    log::info!("Fetching images for {} catalog items", with_source.len());

    for (index, (item, source_url)) in with_source.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            actix_web::rt::time::sleep(delay).await;
        }

        let outcome = match fetch_item_image(client, store, item, source_url.as_str()).await {
            Ok(stored) => ImageRef::new(stored.public_url)
                .map_err(RepositoryError::from)
                .and_then(|image| repo.set_catalog_item_image(&item.id, &image))
                .map_err(IngestError::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(_) => {
                log::info!("Stored image for {}", item.id);
                report.succeeded += 1;
            }
            Err(e) => {
                log::error!("Failed to fetch image for {}: {e}", item.id);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
