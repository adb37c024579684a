use crate::catalog::CatalogRow;
use crate::error::AssetError;

/// Turbine library of the Open Energy Database.
pub const OEDB_URL: &str =
    "https://openenergy-platform.org/api/v0/schema/supply/tables/turbine_library/rows";

/// Something that can download the full catalog.
pub trait CatalogSource {
    /// Downloads every catalog row.
    ///
    /// # Errors
    ///
    /// [`AssetError::RemoteFetchFailed`] on transport failure,
    /// [`AssetError::MalformedCatalog`] if the payload is not a row array.
    fn fetch(&self) -> Result<Vec<CatalogRow>, AssetError>;

    /// Location of the catalog, recorded in the provenance of resolved records.
    fn url(&self) -> &str;
}

/// Blocking HTTP client for the OEDB turbine library.
#[derive(Debug, Clone)]
pub struct OedbClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl OedbClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for OedbClient {
    fn default() -> Self {
        Self::new(OEDB_URL)
    }
}

impl CatalogSource for OedbClient {
    fn fetch(&self) -> Result<Vec<CatalogRow>, AssetError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| AssetError::RemoteFetchFailed(e.to_string()))?;
        parse_rows(&body)
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Decodes a catalog response body.
pub fn parse_rows(body: &str) -> Result<Vec<CatalogRow>, AssetError> {
    serde_json::from_str(body).map_err(|e| AssetError::MalformedCatalog(e.to_string()))
}
