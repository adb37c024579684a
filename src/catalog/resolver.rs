use std::sync::Arc;

use crate::assets::{TurbineConfig, TurbineRecord};
use crate::catalog::{CatalogCache, CatalogQuery, CatalogRow, CatalogSource, RawHubHeight};
use crate::error::{AssetError, CandidateSummary};

/// Hub height assumed when the catalog reports none (m).
pub const DEFAULT_HUB_HEIGHT: f64 = 100.0;

/// Number of candidates reported for an ambiguous query.
const MAX_REPORTED_CANDIDATES: usize = 3;

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMatch {
    /// Exactly one row matched.
    Unique(TurbineRecord),
    /// Several rows matched; `candidates` holds the first few.
    Ambiguous {
        total: usize,
        candidates: Vec<CandidateSummary>,
    },
    NotFound,
}

/// Resolves structured queries against a shared [`CatalogCache`].
#[derive(Debug)]
pub struct CatalogResolver<S> {
    cache: Arc<CatalogCache<S>>,
}

impl<S> Clone for CatalogResolver<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: CatalogSource> CatalogResolver<S> {
    pub fn new(cache: Arc<CatalogCache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<CatalogCache<S>> {
        &self.cache
    }

    /// Looks up `query` in the catalog, fetching it on first use.
    ///
    /// No match and multiple matches are not errors; both are logged and
    /// returned as [`CatalogMatch`] variants.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures from the cache, and returns
    /// [`AssetError::InvalidRecord`] if the single matching row has a
    /// malformed power curve.
    pub fn resolve(&self, query: &CatalogQuery) -> Result<CatalogMatch, AssetError> {
        let rows = self.cache.get()?;
        let matched: Vec<&CatalogRow> = rows.iter().filter(|row| query.matches(row)).collect();

        match matched.as_slice() {
            [] => {
                tracing::info!(%query, "no turbine found");
                Ok(CatalogMatch::NotFound)
            }
            [row] => normalize_row(row, self.cache.source().url()).map(CatalogMatch::Unique),
            _ => {
                let candidates: Vec<CandidateSummary> = matched
                    .iter()
                    .take(MAX_REPORTED_CANDIDATES)
                    .map(|row| CandidateSummary {
                        id: row.id,
                        manufacturer: row.manufacturer.trim().to_string(),
                        turbine_type: row.turbine_type.trim().to_string(),
                    })
                    .collect();
                tracing::info!(
                    %query,
                    total = matched.len(),
                    candidates = %candidates
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                    "query matches several turbines, use an id for an unambiguous search"
                );
                Ok(CatalogMatch::Ambiguous {
                    total: matched.len(),
                    candidates,
                })
            }
        }
    }
}

/// Hub height extracted from a catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct HubHeight {
    /// Height used by the record (m).
    pub height: f64,
    /// All reported heights when more than one was given.
    pub heights: Vec<f64>,
    /// Set when the value was assumed or averaged and should be checked.
    pub needs_review: bool,
}

impl HubHeight {
    fn assumed() -> Self {
        tracing::warn!(
            hub_height = DEFAULT_HUB_HEIGHT,
            "no hub height defined in catalog row, manual clean-up required; assuming default"
        );
        Self {
            height: DEFAULT_HUB_HEIGHT,
            heights: Vec::new(),
            needs_review: true,
        }
    }

    fn single(height: f64) -> Self {
        Self {
            height,
            heights: Vec::new(),
            needs_review: false,
        }
    }
}

/// Interprets the catalog hub height.
///
/// Missing, empty, zero, or unparseable values fall back to
/// [`DEFAULT_HUB_HEIGHT`]. A `;`-separated list of several heights is kept in
/// full and averaged, rounded to whole meters. Both corrections set
/// [`HubHeight::needs_review`] and log a warning.
pub fn parse_hub_height(raw: Option<&RawHubHeight>) -> HubHeight {
    let text = match raw {
        None => return HubHeight::assumed(),
        Some(RawHubHeight::Number(h)) if h.is_finite() && *h != 0.0 => {
            return HubHeight::single(*h);
        }
        Some(RawHubHeight::Number(_)) => return HubHeight::assumed(),
        Some(RawHubHeight::Text(text)) => text.trim(),
    };

    let parsed: Result<Vec<f64>, _> = text
        .split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse::<f64>)
        .collect();

    match parsed.as_deref() {
        Ok([]) | Err(_) => HubHeight::assumed(),
        Ok([h]) if *h == 0.0 => HubHeight::assumed(),
        Ok([h]) => HubHeight::single(*h),
        Ok(heights) => {
            let mean = (heights.iter().sum::<f64>() / heights.len() as f64).round();
            tracing::warn!(
                hub_heights = ?heights,
                hub_height = mean,
                "multiple hub heights in catalog row, manual clean-up required; using the average"
            );
            HubHeight {
                height: mean,
                heights: heights.to_vec(),
                needs_review: true,
            }
        }
    }
}

/// Converts a catalog row into a turbine record.
///
/// Power values are converted from kW to MW; names are trimmed; the
/// provenance combines the row's source with the catalog location.
pub fn normalize_row(row: &CatalogRow, catalog_url: &str) -> Result<TurbineRecord, AssetError> {
    let velocities = decode_curve(row, "power_curve_wind_speeds", &row.power_curve_wind_speeds)?;
    let power: Vec<f64> = decode_curve(row, "power_curve_values", &row.power_curve_values)?
        .into_iter()
        .map(|kw| kw / 1e3)
        .collect();
    let hub = parse_hub_height(row.hub_height.as_ref());

    TurbineRecord::try_from(TurbineConfig {
        name: row.turbine_type.trim().to_string(),
        manufacturer: row.manufacturer.trim().to_string(),
        source: Some(format!(
            "Original: {}. Via OEDB {catalog_url}",
            row.source.as_deref().unwrap_or("unknown")
        )),
        hub_height: hub.height,
        hub_heights: hub.heights,
        velocities,
        power,
    })
}

fn decode_curve(row: &CatalogRow, field: &str, value: &Option<String>) -> Result<Vec<f64>, AssetError> {
    let encoded = value.as_deref().ok_or_else(|| {
        AssetError::InvalidRecord(format!("catalog row {} has no `{field}`", row.id))
    })?;
    serde_json::from_str(encoded).map_err(|e| {
        AssetError::InvalidRecord(format!("catalog row {} has malformed `{field}`: {e}", row.id))
    })
}
