//! Turbine specifications: the ways a caller can name a turbine.
//!
//! A specification is classified once, at the boundary, into a
//! [`TurbineSpec`]. Plain strings name a local record unless they carry the
//! `oedb:` prefix. Structured selectors come from configuration tables such
//! as `{ source = "oedb", name = "E-82", manufacturer = "Enercon" }`.

use serde::Deserialize;

use crate::catalog::CatalogQuery;
use crate::error::AssetError;

/// Prefix marking a free-text catalog query, e.g. `oedb:Enercon E-82/2000`.
pub const REMOTE_PREFIX: &str = "oedb:";

/// A classified turbine specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurbineSpec {
    /// A record in the local turbine directory, by file stem.
    Local(String),
    /// A structured catalog query.
    Remote(CatalogQuery),
    /// A free-text catalog query, parsed with [`CatalogQuery::from_text`].
    RemoteText(String),
}

/// Raw structured specification as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurbineSelector {
    /// `"oedb"` or `"local"`; `"oedb"` is assumed when absent.
    pub source: Option<String>,
    /// Local file stem, required for `source = "local"`.
    pub filename: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
}

impl TurbineSpec {
    /// Classifies a plain string.
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix(REMOTE_PREFIX) {
            Some(query) => Self::RemoteText(query.to_string()),
            None => Self::Local(s.to_string()),
        }
    }

    /// Classifies a structured selector.
    ///
    /// # Errors
    ///
    /// [`AssetError::InvalidSource`] for a source other than `oedb` or
    /// `local`; [`AssetError::UnsupportedSpecification`] for a local selector
    /// without `filename`.
    pub fn from_selector(selector: TurbineSelector) -> Result<Self, AssetError> {
        let source = match selector.source.as_deref() {
            Some(source) => source,
            None => {
                tracing::warn!("no `source` given in turbine selector, assuming 'oedb'");
                "oedb"
            }
        };

        match source {
            "oedb" => Ok(Self::Remote(CatalogQuery {
                id: selector.id,
                name: selector.name,
                manufacturer: selector.manufacturer,
            })),
            "local" => selector.filename.map(Self::Local).ok_or_else(|| {
                AssetError::UnsupportedSpecification(
                    "a selector with source 'local' needs a `filename`".to_string(),
                )
            }),
            other => Err(AssetError::InvalidSource(other.to_string())),
        }
    }

    /// Classifies a configuration value: a string or a table.
    ///
    /// # Errors
    ///
    /// [`AssetError::UnsupportedSpecification`] for any other value type or
    /// a table that is not a valid selector, plus the errors of
    /// [`TurbineSpec::from_selector`].
    pub fn from_value(value: &toml::Value) -> Result<Self, AssetError> {
        match value {
            toml::Value::String(s) => Ok(Self::parse(s)),
            toml::Value::Table(_) => {
                let selector = value
                    .clone()
                    .try_into::<TurbineSelector>()
                    .map_err(|e| AssetError::UnsupportedSpecification(e.to_string()))?;
                Self::from_selector(selector)
            }
            other => Err(AssetError::UnsupportedSpecification(format!(
                "expected a turbine name or a selector table, got a {}",
                other.type_str()
            ))),
        }
    }
}

impl std::fmt::Display for TurbineSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(name) => write!(f, "{name}"),
            Self::Remote(query) => write!(f, "{REMOTE_PREFIX}{{{query}}}"),
            Self::RemoteText(text) => write!(f, "{REMOTE_PREFIX}{text}"),
        }
    }
}
