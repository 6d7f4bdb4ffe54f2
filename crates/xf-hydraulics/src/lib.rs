//! xf-hydraulics: conductance models for the soil-plant hydraulic pathway.
//!
//! Provides:
//! - Weibull vulnerability curves for root, stem and leaf xylem
//! - van Genuchten unsaturated soil conductivity and the rhizosphere
//!   pressure drop across concentric soil shells
//! - Root-layer conductance shares derived from a root depth distribution
//! - The immutable parameter bundle for a whole plant
//!
//! Every model is a deterministic function of tension (a non-negative MPa
//! magnitude) and parameters, suitable for nesting inside Newton solvers.
//!
//! # Example
//!
//! ```
//! use xf_hydraulics::{ConductingElement, Organ, OrganKind, WeibullCurve};
//!
//! let leaf = Organ::new(OrganKind::Leaf, WeibullCurve::new(1.3, 3.0).unwrap(), 40.0).unwrap();
//! let e = leaf.flow(0.5, 1.5);
//! assert!(e > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod plant;
pub mod root_layers;
pub mod soil;
pub mod traits;
pub mod weibull;

// Re-exports
pub use error::{HydraulicsError, HydraulicsResult};
pub use plant::{MaxConductances, PlantHydraulics, WeibullParameters};
pub use root_layers::{RootDistribution, RootLayer, RootLayerProfile};
pub use soil::{SoilParameters, soil_pressure};
pub use traits::ConductingElement;
pub use weibull::{Organ, OrganKind, WeibullCurve, conductance_fraction, integrated_flow};
