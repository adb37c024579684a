//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use renewable_assets::catalog::{CatalogCache, CatalogRow, CatalogSource, RawHubHeight};
use renewable_assets::config::ResourceConfig;
use renewable_assets::error::AssetError;
use renewable_assets::resources::Resources;
use tempfile::TempDir;

/// In-memory catalog that counts downloads and can simulate an outage.
pub struct FakeCatalog {
    rows: Vec<CatalogRow>,
    offline: bool,
    fetches: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self {
            rows,
            offline: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CatalogSource for FakeCatalog {
    fn fetch(&self) -> Result<Vec<CatalogRow>, AssetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(AssetError::RemoteFetchFailed("connection refused".into()));
        }
        Ok(self.rows.clone())
    }

    fn url(&self) -> &str {
        "https://catalog.test/turbine_library/rows"
    }
}

/// Catalog row with a three-point curve in kW.
pub fn catalog_row(id: i64, manufacturer: &str, turbine_type: &str, hub_height: Option<&str>) -> CatalogRow {
    CatalogRow {
        id,
        has_power_curve: Some(true),
        turbine_type: turbine_type.to_string(),
        manufacturer: manufacturer.to_string(),
        hub_height: hub_height.map(|h| RawHubHeight::Text(h.to_string())),
        power_curve_wind_speeds: Some("[0.0, 5.0, 10.0, 15.0, 20.0, 25.0]".to_string()),
        power_curve_values: Some("[0, 100, 500, 900, 1000, 1000]".to_string()),
        source: Some("test data".to_string()),
    }
}

/// Default catalog: two Enercon E-82 variants, one Vestas, one Acme Wind,
/// and a row without a power curve.
pub fn default_catalog() -> FakeCatalog {
    let mut no_curve = catalog_row(99, "Siemens", "SWT-3.6-107", Some("80"));
    no_curve.has_power_curve = Some(false);
    FakeCatalog::new(vec![
        catalog_row(1, "Enercon", "E-82/2000", Some("98")),
        catalog_row(2, "Enercon", "E-82/2300", None),
        catalog_row(3, "Vestas", "V112/3000", Some("100;120")),
        catalog_row(4, " Acme Wind ", " X-200 ", Some("140")),
        no_curve,
    ])
}

/// A temporary resource root with empty `windturbine/` and `solarpanel/`
/// directories, plus resources over it backed by `catalog`.
pub fn resources_with(catalog: FakeCatalog) -> (TempDir, Arc<CatalogCache<FakeCatalog>>, Resources<FakeCatalog>) {
    let root = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(root.path().join("windturbine")).expect("mkdir");
    std::fs::create_dir_all(root.path().join("solarpanel")).expect("mkdir");
    let cache = Arc::new(CatalogCache::new(catalog));
    let resources = Resources::with_catalog(ResourceConfig::with_root(root.path()), Arc::clone(&cache))
        .expect("resources");
    (root, cache, resources)
}

/// Writes a raw record file.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write fixture");
}

/// Local turbine record in the on-disk format.
pub const LOCAL_TURBINE: &str = r#"
name = "Test 2MW"
manufacturer = "Example"
hub_height = 80
velocities = [0, 5, 10, 15, 20, 25]
power = [0.0, 0.1, 0.5, 0.9, 1.0, 1.0]
"#;

/// Bundled resource directory of the crate.
pub fn bundled_resources() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}
