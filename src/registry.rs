//! Names of the turbine and panel records available locally.

use std::collections::BTreeSet;

use crate::error::AssetError;
use crate::store::LocalStore;

/// Known local asset names.
///
/// Only names are held; record content is read on demand. The registry is
/// rebuilt from scratch by [`ResourceRegistry::refresh`] whenever the search
/// directories change.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    windturbines: BTreeSet<String>,
    solarpanels: BTreeSet<String>,
}

impl ResourceRegistry {
    /// Builds a registry populated from the two stores.
    pub fn scan(turbines: &LocalStore, panels: &LocalStore) -> Result<Self, AssetError> {
        let mut registry = Self::default();
        registry.refresh(turbines, panels)?;
        Ok(registry)
    }

    /// Clears and repopulates both name sets.
    ///
    /// On error the registry keeps its previous content.
    pub fn refresh(&mut self, turbines: &LocalStore, panels: &LocalStore) -> Result<(), AssetError> {
        let windturbines = turbines.list()?;
        let solarpanels = panels.list()?;
        self.windturbines = windturbines;
        self.solarpanels = solarpanels;
        tracing::debug!(
            windturbines = self.windturbines.len(),
            solarpanels = self.solarpanels.len(),
            "resource registry refreshed"
        );
        Ok(())
    }

    pub fn windturbines(&self) -> &BTreeSet<String> {
        &self.windturbines
    }

    pub fn solarpanels(&self) -> &BTreeSet<String> {
        &self.solarpanels
    }

    pub fn has_windturbine(&self, name: &str) -> bool {
        self.windturbines.contains(name)
    }

    pub fn has_solarpanel(&self, name: &str) -> bool {
        self.solarpanels.contains(name)
    }
}
