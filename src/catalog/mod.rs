//! Remote turbine catalog (OEDB turbine library): fetching, caching, and
//! query resolution.

/// Lazily populated snapshot of the catalog.
pub mod cache;
/// Query filtering and row normalization.
pub mod resolver;
/// Catalog download.
pub mod source;

pub use cache::CatalogCache;
pub use resolver::{CatalogMatch, CatalogResolver, HubHeight};
pub use source::{CatalogSource, OEDB_URL, OedbClient};

use serde::{Deserialize, Deserializer};

use crate::error::AssetError;

/// One row of the catalog as served by the endpoint.
///
/// Both curve fields are JSON-encoded arrays inside a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRow {
    pub id: i64,
    #[serde(default)]
    pub has_power_curve: Option<bool>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub turbine_type: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub manufacturer: String,
    #[serde(default)]
    pub hub_height: Option<RawHubHeight>,
    #[serde(default)]
    pub power_curve_wind_speeds: Option<String>,
    #[serde(default)]
    pub power_curve_values: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Hub height as reported by the catalog: a number, or text that may list
/// several heights separated by `;`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawHubHeight {
    Number(f64),
    Text(String),
}

impl CatalogRow {
    /// Whether the row carries a power curve that can be turned into a record.
    pub fn has_usable_curve(&self) -> bool {
        self.has_power_curve == Some(true)
            && self.power_curve_wind_speeds.is_some()
            && self.power_curve_values.is_some()
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Structured search against the catalog.
///
/// All present fields must match: `id` exactly, `name` as a case-insensitive
/// substring of the turbine type, `manufacturer` as a case-insensitive
/// substring of the manufacturer. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
}

impl CatalogQuery {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Parses a free-text query.
    ///
    /// Digits only select an id. Otherwise the text is split at the first
    /// run of whitespace, `_` or `|`: one token is a turbine name, two tokens
    /// are manufacturer and name, e.g. `"Enercon E-126/7500"`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::UnsupportedSpecification`] for empty text.
    pub fn from_text(text: &str) -> Result<Self, AssetError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssetError::UnsupportedSpecification(
                "empty catalog query".to_string(),
            ));
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            let id = text.parse().map_err(|_| {
                AssetError::UnsupportedSpecification(format!("catalog id \"{text}\" out of range"))
            })?;
            return Ok(Self::by_id(id));
        }

        let is_sep = |c: char| c.is_whitespace() || c == '_' || c == '|';
        let Some(start) = text.find(is_sep) else {
            return Ok(Self {
                name: Some(text.to_string()),
                ..Self::default()
            });
        };
        let rest = text[start..].trim_start_matches(is_sep);
        let first = &text[..start];

        Ok(match (first.is_empty(), rest.is_empty()) {
            (false, false) => Self {
                manufacturer: Some(first.to_string()),
                name: Some(rest.to_string()),
                id: None,
            },
            (true, _) => Self {
                name: Some(rest.to_string()),
                ..Self::default()
            },
            (false, true) => Self {
                name: Some(first.to_string()),
                ..Self::default()
            },
        })
    }

    /// Whether `row` satisfies every present filter.
    pub fn matches(&self, row: &CatalogRow) -> bool {
        self.id.is_none_or(|id| id == row.id)
            && non_empty(&self.name).is_none_or(|name| contains_ignore_case(&row.turbine_type, name))
            && non_empty(&self.manufacturer)
                .is_none_or(|manufacturer| contains_ignore_case(&row.manufacturer, manufacturer))
    }
}

impl std::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id={id}"));
        }
        if let Some(name) = non_empty(&self.name) {
            parts.push(format!("name={name}"));
        }
        if let Some(manufacturer) = non_empty(&self.manufacturer) {
            parts.push(format!("manufacturer={manufacturer}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, manufacturer: &str, turbine_type: &str) -> CatalogRow {
        CatalogRow {
            id,
            has_power_curve: Some(true),
            turbine_type: turbine_type.into(),
            manufacturer: manufacturer.into(),
            hub_height: None,
            power_curve_wind_speeds: Some("[0, 25]".into()),
            power_curve_values: Some("[0, 2000]".into()),
            source: None,
        }
    }

    #[test]
    fn test_digits_select_id() {
        assert_eq!(CatalogQuery::from_text(" 42 ").ok(), Some(CatalogQuery::by_id(42)));
    }

    #[test]
    fn test_single_token_is_name() {
        let q = CatalogQuery::from_text("E-53/800").expect("parse");
        assert_eq!(q.name.as_deref(), Some("E-53/800"));
        assert_eq!(q.manufacturer, None);
    }

    #[test]
    fn test_two_tokens_are_manufacturer_and_name() {
        let q = CatalogQuery::from_text("Enercon  E-126/7500").expect("parse");
        assert_eq!(q.manufacturer.as_deref(), Some("Enercon"));
        assert_eq!(q.name.as_deref(), Some("E-126/7500"));

        let q = CatalogQuery::from_text("Vestas_V112|3.45").expect("parse");
        assert_eq!(q.manufacturer.as_deref(), Some("Vestas"));
        assert_eq!(q.name.as_deref(), Some("V112|3.45"));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            CatalogQuery::from_text("   "),
            Err(AssetError::UnsupportedSpecification(_))
        ));
    }

    #[test]
    fn test_filters_are_case_insensitive_substrings() {
        let r = row(7, "Enercon GmbH", "E-82/2000");
        let q = CatalogQuery {
            name: Some("e-82".into()),
            manufacturer: Some("ENERCON".into()),
            id: None,
        };
        assert!(q.matches(&r));
        assert!(!CatalogQuery::by_id(8).matches(&r));
        assert!(CatalogQuery::by_id(7).matches(&r));
    }

    #[test]
    fn test_empty_strings_do_not_filter() {
        let q = CatalogQuery {
            name: Some(String::new()),
            ..CatalogQuery::default()
        };
        assert!(q.matches(&row(1, "Any", "Type")));
    }

    #[test]
    fn test_row_decodes_with_nulls() {
        let json = r#"{"id": 3, "has_power_curve": null, "turbine_type": null,
            "manufacturer": "Nordex", "hub_height": "80;100",
            "power_curve_wind_speeds": null, "power_curve_values": null, "source": null}"#;
        let r: CatalogRow = serde_json::from_str(json).expect("row should decode");
        assert_eq!(r.turbine_type, "");
        assert_eq!(r.hub_height, Some(RawHubHeight::Text("80;100".into())));
        assert!(!r.has_usable_curve());
    }
}
