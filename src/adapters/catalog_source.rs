use crate::adapters::storage::LocalStorage;
use crate::core::catalog::Catalog;
use crate::domain::model::CatalogDocument;
use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{is_http_location, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const EMBEDDED_LOCATION: &str = "embedded";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 編譯時內嵌的預設目錄
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCatalogSource;

#[async_trait]
impl CatalogSource for EmbeddedCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogDocument> {
        Catalog::embedded_document()
    }

    fn describe(&self) -> String {
        EMBEDDED_LOCATION.to_string()
    }
}

/// 透過 Storage 讀取 JSON 目錄檔
pub struct StorageCatalogSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> StorageCatalogSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for StorageCatalogSource<S> {
    async fn fetch_catalog(&self) -> Result<CatalogDocument> {
        tracing::debug!("Reading catalog file: {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path)
    }
}

/// 從遠端 URL 下載 JSON 目錄
pub struct HttpCatalogSource {
    url: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        validate_url("catalog.url", &url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogDocument> {
        tracing::debug!("Making catalog request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PlannerError::catalog(format!(
                "catalog endpoint {} returned status {}",
                self.url,
                response.status()
            )));
        }

        Ok(response.json::<CatalogDocument>().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// 依位置字串選擇來源："embedded"、http(s) URL，其餘視為檔案路徑
pub fn catalog_source_from_location(
    location: &str,
    timeout_seconds: Option<u64>,
) -> Result<Box<dyn CatalogSource>> {
    let location = location.trim();

    if location.is_empty() || location == EMBEDDED_LOCATION {
        return Ok(Box::new(EmbeddedCatalogSource));
    }

    if is_http_location(location) {
        let timeout = Duration::from_secs(timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS));
        return Ok(Box::new(HttpCatalogSource::with_timeout(location, timeout)?));
    }

    let path = Path::new(location);
    let parent = path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .ok_or_else(|| PlannerError::InvalidConfigValueError {
            field: "catalog".to_string(),
            value: location.to_string(),
            reason: "Catalog path has no file name".to_string(),
        })?;

    Ok(Box::new(StorageCatalogSource::new(
        LocalStorage::new(parent),
        file_name,
    )))
}

/// 讀取並驗證目錄，回傳可共享的唯讀結構
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Arc<Catalog>> {
    tracing::info!("📚 Loading plan catalog from {}", source.describe());
    let document = source.fetch_catalog().await?;
    let catalog = Catalog::from_document(document)?;
    tracing::info!("✅ Catalog loaded with {} plans", catalog.len());
    Ok(Arc::new(catalog))
}
