//! Top-level asset resolution.
//!
//! [`Resources`] owns the configuration, the local stores, the registry of
//! local names, and a handle to the catalog cache. Changing the search
//! directories through it rebuilds the stores and refreshes the registry.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::{PanelConfig, PanelRecord, TurbineConfig, TurbineRecord};
use crate::capacity::{panel_rated_capacity, turbine_rated_capacity};
use crate::catalog::{CatalogCache, CatalogMatch, CatalogQuery, CatalogResolver, CatalogSource, OedbClient};
use crate::config::ResourceConfig;
use crate::error::AssetError;
use crate::registry::ResourceRegistry;
use crate::selector::TurbineSpec;
use crate::store::{LocalStore, record_file_stem};

/// Resolves turbine and panel specifications into records.
#[derive(Debug)]
pub struct Resources<S = OedbClient> {
    config: ResourceConfig,
    turbines: LocalStore,
    panels: LocalStore,
    registry: ResourceRegistry,
    catalog: CatalogResolver<S>,
}

impl Resources<OedbClient> {
    /// Creates resources backed by the OEDB catalog at `config.catalog.url`.
    pub fn new(config: ResourceConfig) -> Result<Self, AssetError> {
        let cache = Arc::new(CatalogCache::new(OedbClient::new(config.catalog.url.clone())));
        Self::with_catalog(config, cache)
    }
}

impl<S: CatalogSource> Resources<S> {
    /// Creates resources using an existing catalog cache, which may be
    /// shared with other instances.
    pub fn with_catalog(
        config: ResourceConfig,
        cache: Arc<CatalogCache<S>>,
    ) -> Result<Self, AssetError> {
        let (turbines, panels) = stores(&config);
        let registry = ResourceRegistry::scan(&turbines, &panels)?;
        Ok(Self {
            config,
            turbines,
            panels,
            registry,
            catalog: CatalogResolver::new(cache),
        })
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Replaces the configuration and refreshes the registry.
    pub fn set_config(&mut self, config: ResourceConfig) -> Result<(), AssetError> {
        self.config = config;
        self.on_config_change()
    }

    pub fn set_windturbine_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), AssetError> {
        self.config.resources.windturbine_dir = dir.into();
        self.on_config_change()
    }

    pub fn set_solarpanel_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), AssetError> {
        self.config.resources.solarpanel_dir = dir.into();
        self.on_config_change()
    }

    fn on_config_change(&mut self) -> Result<(), AssetError> {
        let (turbines, panels) = stores(&self.config);
        self.turbines = turbines;
        self.panels = panels;
        self.registry.refresh(&self.turbines, &self.panels)
    }

    /// Names of the locally available turbines.
    pub fn windturbines(&self) -> &BTreeSet<String> {
        self.registry.windturbines()
    }

    /// Names of the locally available solar panels.
    pub fn solarpanels(&self) -> &BTreeSet<String> {
        self.registry.solarpanels()
    }

    /// Resolves a turbine specification.
    ///
    /// Local names are read from the turbine directory; catalog queries are
    /// resolved remotely and not stored.
    ///
    /// # Errors
    ///
    /// [`AssetError::NotFound`] and [`AssetError::Ambiguous`] are recoverable
    /// (see [`AssetError::is_recoverable`]); catalog fetch failures, invalid
    /// specifications and malformed records are not.
    pub fn resolve_turbine(&self, spec: &TurbineSpec) -> Result<TurbineRecord, AssetError> {
        match spec {
            TurbineSpec::Local(name) => self.read_turbine(name),
            TurbineSpec::Remote(query) => self.resolve_remote(query),
            TurbineSpec::RemoteText(text) => self.resolve_remote(&CatalogQuery::from_text(text)?),
        }
    }

    /// Resolves `query` in the catalog and stores the result in the turbine
    /// directory, returning the record and the written path.
    ///
    /// Nothing is written when the query does not match exactly one turbine.
    pub fn resolve_and_persist(
        &mut self,
        query: &CatalogQuery,
    ) -> Result<(TurbineRecord, PathBuf), AssetError> {
        let record = self.resolve_remote(query)?;
        let stem = record_file_stem(&record.manufacturer, &record.name);
        let path = self.turbines.write(&stem, &record.to_config())?;
        self.registry.refresh(&self.turbines, &self.panels)?;
        tracing::info!(path = %path.display(), "turbine configuration downloaded");
        Ok((record, path))
    }

    /// Reads a solar panel record from the panel directory.
    pub fn resolve_panel(&self, name: &str) -> Result<PanelRecord, AssetError> {
        let config: PanelConfig = self.panels.read(name)?;
        PanelRecord::try_from(config)
    }

    /// Rated power of one unit of the specified turbine (MW).
    pub fn windturbine_rated_capacity(&self, spec: &TurbineSpec) -> Result<f64, AssetError> {
        self.resolve_turbine(spec).map(|t| turbine_rated_capacity(&t))
    }

    /// Rated capacity per m² of the named panel.
    pub fn solarpanel_rated_capacity(&self, name: &str) -> Result<f64, AssetError> {
        self.resolve_panel(name).map(|p| panel_rated_capacity(&p))
    }

    fn read_turbine(&self, name: &str) -> Result<TurbineRecord, AssetError> {
        let config: TurbineConfig = self.turbines.read(name)?;
        TurbineRecord::try_from(config)
    }

    fn resolve_remote(&self, query: &CatalogQuery) -> Result<TurbineRecord, AssetError> {
        match self.catalog.resolve(query)? {
            CatalogMatch::Unique(record) => Ok(record),
            CatalogMatch::NotFound => Err(AssetError::NotFound {
                kind: "catalog turbine",
                name: query.to_string(),
            }),
            CatalogMatch::Ambiguous { total, candidates } => Err(AssetError::Ambiguous {
                count: total,
                candidates,
            }),
        }
    }
}

fn stores(config: &ResourceConfig) -> (LocalStore, LocalStore) {
    (
        LocalStore::new(&config.resources.windturbine_dir, "turbine"),
        LocalStore::new(&config.resources.solarpanel_dir, "panel"),
    )
}
