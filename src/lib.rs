//! Wind turbine and solar panel model resolution with fleet power-curve
//! smoothing.

pub mod assets;
pub mod capacity;
/// Remote turbine catalog access.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod registry;
pub mod resources;
pub mod selector;
pub mod smoothing;
pub mod store;
