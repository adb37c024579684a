use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// On-disk shape of a solar panel record.
///
/// Coefficients not needed to identify the model (temperature factors,
/// inverter efficiency, ...) are kept verbatim in `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `"huld"` or `"bofinger"`; files without a model are Huld panels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(rename = "A", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(rename = "C", default, skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(flatten)]
    pub parameters: BTreeMap<String, toml::Value>,
}

/// Electrical model of a solar panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelModel {
    /// Huld et al. model; `efficiency` is the nominal module efficiency.
    Huld { efficiency: f64 },
    /// Bofinger model with the polynomial coefficients `A`, `B`, `C`.
    Bofinger { a: f64, b: f64, c: f64 },
}

impl PanelModel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Huld { .. } => "huld",
            Self::Bofinger { .. } => "bofinger",
        }
    }
}

/// A validated solar panel model.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRecord {
    pub name: String,
    pub source: Option<String>,
    pub model: PanelModel,
    /// Remaining coefficients of the panel file.
    pub parameters: BTreeMap<String, toml::Value>,
}

impl TryFrom<PanelConfig> for PanelRecord {
    type Error = AssetError;

    fn try_from(config: PanelConfig) -> Result<Self, Self::Error> {
        let missing = |key: &str| {
            AssetError::InvalidRecord(format!(
                "panel \"{}\" is missing coefficient `{key}`",
                config.name
            ))
        };

        let model = match config.model.as_deref().unwrap_or("huld") {
            "huld" => PanelModel::Huld {
                efficiency: config.efficiency.ok_or_else(|| missing("efficiency"))?,
            },
            "bofinger" => PanelModel::Bofinger {
                a: config.a.ok_or_else(|| missing("A"))?,
                b: config.b.ok_or_else(|| missing("B"))?,
                c: config.c.ok_or_else(|| missing("C"))?,
            },
            other => {
                return Err(AssetError::InvalidRecord(format!(
                    "panel \"{}\" has unknown model \"{other}\", expected \"huld\" or \"bofinger\"",
                    config.name
                )));
            }
        };

        Ok(Self {
            name: config.name,
            source: config.source,
            model,
            parameters: config.parameters,
        })
    }
}
