//! Asset records: wind turbines and solar panels.

/// Solar panel records and models.
pub mod panel;
/// Wind turbine records and power curves.
pub mod turbine;

pub use panel::{PanelConfig, PanelModel, PanelRecord};
pub use turbine::{TurbineConfig, TurbineRecord};
