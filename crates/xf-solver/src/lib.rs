//! xf-solver: steady-state flow solvers for the soil-plant continuum.
//!
//! Every unknown pressure is found with one bounded Newton primitive
//! ([`newton::newton_solve`]), nested as needed:
//!
//! - rhizosphere tension per soil column or layer ([`soil_root`])
//! - stem junction tension ([`stem_leaf`])
//! - root-zone tension balancing uptake against transport ([`whole_plant`])
//! - predawn tension of a layered root zone
//! - leaf tension meeting an atmospheric demand ([`regulation`])
//!
//! On top of these sit supply curves ([`supply`]) and the stomatal
//! regulation model ([`regulation`]). Solves that exhaust their iteration
//! budget return their last iterate flagged as unconverged.

pub mod derivative;
pub mod error;
pub mod estimate;
pub mod newton;
pub mod policy;
pub mod regulation;
pub mod soil_root;
pub mod stem_leaf;
pub mod supply;
pub mod whole_plant;

pub use error::{SolverError, SolverResult};
pub use estimate::{FlowEstimate, PressureEstimate};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use regulation::{
    DemandRegime, RegulationPoint, Transpiration, find_regulation, leaf_pressure_for_flow,
    max_regulated_flow, regulation_pressure, transpiration_under_demand,
};
pub use soil_root::{predawn_pressure, soil_root_flow, soil_root_flow_multi};
pub use stem_leaf::stem_leaf_flow;
pub use supply::{SupplyCurve, SupplyPoint, build_supply_curve};
pub use whole_plant::{
    FlowPath, MultiLayerPath, SingleLayerPath, StemLeafPath, SupplyVariant, whole_plant_flow,
    whole_plant_flow_multi,
};
