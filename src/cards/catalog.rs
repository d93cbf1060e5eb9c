// Listing calls go against the storage bucket's object listing endpoint; the
// bucket stores scans as `CC1/<card name>.jpg`, so object names are stripped
// down to bare card names here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::{CARD_FILE_EXT, STORAGE_FOLDER};

/// Upper bound on the listing call so a slow storage endpoint cannot eat the
/// whole interaction response window.
const LISTING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("card listing request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Source of the current card catalog. Fetched fresh on every resolution
/// request; callers must not assume two fetches return the same list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn card_names(&self) -> Result<Vec<String>, CatalogError>;
}

/// Catalog backed by the remote storage bucket's listing endpoint.
pub struct StorageCatalog {
    client: Client,
    base: Url,
}

impl StorageCatalog {
    pub fn new(base: Url) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(LISTING_TIMEOUT).build()?;
        Ok(Self { client, base })
    }
}

#[derive(Deserialize)]
struct ObjectListing {
    #[serde(default)]
    items: Vec<StorageObject>,
}

#[derive(Deserialize)]
struct StorageObject {
    name: String,
}

#[async_trait]
impl CatalogSource for StorageCatalog {
    async fn card_names(&self) -> Result<Vec<String>, CatalogError> {
        let listing: ObjectListing = self
            .client
            .get(self.base.clone())
            .query(&[("prefix", format!("{STORAGE_FOLDER}/"))])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(listing
            .items
            .into_iter()
            .filter_map(|object| card_name_from_object(&object.name))
            .collect())
    }
}

/// Strips the storage folder prefix and card file extension from an object
/// name. Objects that are not card scans (wrong extension) are skipped.
fn card_name_from_object(object_name: &str) -> Option<String> {
    let name = object_name
        .strip_prefix(STORAGE_FOLDER)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(object_name);
    name.strip_suffix(CARD_FILE_EXT).map(str::to_owned)
}
