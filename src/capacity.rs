//! Rated capacity per unit of a turbine or a panel.

use crate::assets::{PanelModel, PanelRecord, TurbineRecord};

/// Rated power of one turbine (MW).
pub fn turbine_rated_capacity(record: &TurbineRecord) -> f64 {
    record.rated_power
}

/// Rated capacity per unit of panel area (one unit is one m²).
///
/// For Huld panels this is the nominal efficiency. For Bofinger panels it is
/// `(A + 1000·B + ln(1000)·C) · 1000` W/m², the polynomial efficiency at
/// 1000 W/m² irradiance.
pub fn panel_rated_capacity(record: &PanelRecord) -> f64 {
    match record.model {
        PanelModel::Huld { efficiency } => efficiency,
        PanelModel::Bofinger { a, b, c } => (a + 1000.0 * b + 1000.0_f64.ln() * c) * 1e3,
    }
}
