//! Configuration validation logic.

use crate::schema::{SimulationConfig, VariantDef, WeibullDef};

/// Most soil layers a root zone may have.
pub const MAX_LAYERS: usize = 20;

/// Most scenarios in one sweep.
pub const MAX_SCENARIOS: usize = 200;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing section: {section} ({reason})")]
    MissingSection { section: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(field, value, "must be finite and positive"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(invalid(field, value, "must be finite and non-negative"));
    }
    Ok(())
}

fn weibull(field: &str, def: &WeibullDef) -> Result<(), ValidationError> {
    positive(&format!("{field}.b"), def.b)?;
    positive(&format!("{field}.c"), def.c)
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    if config.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let plant = &config.plant;
    weibull("plant.root", &plant.root)?;
    weibull("plant.stem", &plant.stem)?;
    weibull("plant.leaf", &plant.leaf)?;
    positive("plant.kmax.root", plant.kmax.root)?;
    positive("plant.kmax.stem", plant.kmax.stem)?;
    positive("plant.kmax.leaf", plant.kmax.leaf)?;

    let soil = &config.soil;
    positive("soil.k_soil", soil.k_soil)?;
    positive("soil.alpha", soil.alpha)?;
    positive("soil.n", soil.n)?;
    positive("soil.m", soil.m)?;

    if let Some(zone) = &config.root_zone {
        if zone.layers == 0 || zone.layers > MAX_LAYERS {
            return Err(invalid(
                "root_zone.layers",
                zone.layers,
                "must lie in 1..=20",
            ));
        }
        if !(zone.beta > 0.0 && zone.beta < 1.0) {
            return Err(invalid("root_zone.beta", zone.beta, "must lie in (0, 1)"));
        }
        positive("root_zone.alpha", zone.alpha)?;
        if !zone.pressure_offsets.is_empty() && zone.pressure_offsets.len() != zone.layers {
            return Err(invalid(
                "root_zone.pressure_offsets",
                zone.pressure_offsets.len(),
                "needs one offset per layer",
            ));
        }
        if let Some(bad) = zone.pressure_offsets.iter().find(|o| !o.is_finite()) {
            return Err(invalid("root_zone.pressure_offsets", bad, "must be finite"));
        }
    }

    let sweep = &config.sweep;
    if sweep.variant == VariantDef::MultiLayer && config.root_zone.is_none() {
        return Err(ValidationError::MissingSection {
            section: "root_zone".to_string(),
            reason: "the multi-layer variant needs a layered root zone".to_string(),
        });
    }
    if sweep.scenarios == 0 || sweep.scenarios > MAX_SCENARIOS {
        return Err(invalid(
            "sweep.scenarios",
            sweep.scenarios,
            "must lie in 1..=200",
        ));
    }
    if let Some(range) = &sweep.range {
        weibull("sweep.range", range)?;
    }
    if !sweep.output_scale.is_finite() {
        return Err(invalid("sweep.output_scale", sweep.output_scale, "must be finite"));
    }

    if let Some(demand) = &config.demand {
        non_negative("demand.gmax", demand.gmax)?;
        non_negative("demand.vpd", demand.vpd)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DemandDef, RootZoneDef};

    fn layered() -> SimulationConfig {
        let mut cfg = SimulationConfig::default();
        cfg.sweep.variant = VariantDef::MultiLayer;
        cfg.root_zone = Some(RootZoneDef {
            layers: 5,
            beta: 0.961,
            alpha: 1.0,
            pressure_offsets: vec![0.0, 0.1, 0.2, 0.3, 0.4],
        });
        cfg
    }

    #[test]
    fn defaults_are_valid() {
        validate_config(&SimulationConfig::default()).unwrap();
        validate_config(&SimulationConfig::two_parameter(1.7, 3.0, 1.3, 3.0)).unwrap();
        validate_config(&layered()).unwrap();
    }

    #[test]
    fn multi_layer_needs_a_root_zone() {
        let mut cfg = layered();
        cfg.root_zone = None;
        assert!(matches!(
            validate_config(&cfg),
            Err(ValidationError::MissingSection { .. })
        ));
    }

    #[test]
    fn offsets_must_match_layers() {
        let mut cfg = layered();
        if let Some(zone) = cfg.root_zone.as_mut() {
            zone.pressure_offsets.pop();
        }
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.plant.stem.c = 0.0;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = SimulationConfig::default();
        cfg.soil.alpha = f64::NAN;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = SimulationConfig::default();
        cfg.demand = Some(DemandDef {
            gmax: -1.0,
            vpd: 1.0,
        });
        assert!(validate_config(&cfg).is_err());

        let mut cfg = SimulationConfig::default();
        cfg.sweep.scenarios = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn future_versions_are_refused() {
        let mut cfg = SimulationConfig::default();
        cfg.version = 7;
        assert_eq!(
            validate_config(&cfg),
            Err(ValidationError::UnsupportedVersion { version: 7 })
        );
    }
}
