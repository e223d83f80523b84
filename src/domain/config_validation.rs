//! Configuration validation.
//!
//! Validates every simulation parameter before a run starts.

use crate::domain::error::ValuesimError;
use crate::domain::simulation::SimulationConfig;

pub fn validate_simulation_config(config: &SimulationConfig) -> Result<(), ValuesimError> {
    positive("initial_capital", config.initial_capital)?;
    positive("base_unit", config.base_unit)?;
    non_negative("reserve", config.reserve)?;
    validate_bands(config)?;
    validate_streak_threshold(config)?;
    validate_lookback(config)?;
    validate_clip_bounds(config)?;
    positive("deviation_threshold", config.deviation_threshold)?;
    positive("deviation_step", config.deviation_step)?;
    in_percentile_range("extreme_percentile", config.extreme_percentile)?;
    fraction("extreme_fraction", config.extreme_fraction)?;
    fraction("trend_fraction", config.trend_fraction)?;
    validate_decision_day(config)?;
    Ok(())
}

fn invalid(key: &str, reason: String) -> ValuesimError {
    ValuesimError::ConfigInvalid {
        section: "simulation".to_string(),
        key: key.to_string(),
        reason,
    }
}

fn positive(key: &str, value: f64) -> Result<(), ValuesimError> {
    if value <= 0.0 {
        return Err(invalid(key, format!("{key} must be positive")));
    }
    Ok(())
}

fn non_negative(key: &str, value: f64) -> Result<(), ValuesimError> {
    if value < 0.0 {
        return Err(invalid(key, format!("{key} must be non-negative")));
    }
    Ok(())
}

fn fraction(key: &str, value: f64) -> Result<(), ValuesimError> {
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(key, format!("{key} must be in (0, 1]")));
    }
    Ok(())
}

fn in_percentile_range(key: &str, value: f64) -> Result<(), ValuesimError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(key, format!("{key} must be between 0 and 100")));
    }
    Ok(())
}

fn validate_bands(config: &SimulationConfig) -> Result<(), ValuesimError> {
    in_percentile_range("low_band", config.low_band)?;
    in_percentile_range("high_band", config.high_band)?;
    if config.low_band >= config.high_band {
        return Err(invalid(
            "low_band",
            "low_band must be below high_band".to_string(),
        ));
    }
    Ok(())
}

fn validate_streak_threshold(config: &SimulationConfig) -> Result<(), ValuesimError> {
    if config.streak_threshold < 1 {
        return Err(invalid(
            "streak_threshold",
            "streak_threshold must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_lookback(config: &SimulationConfig) -> Result<(), ValuesimError> {
    if config.lookback < 2 {
        return Err(invalid(
            "lookback",
            "lookback must be at least 2".to_string(),
        ));
    }
    Ok(())
}

fn validate_clip_bounds(config: &SimulationConfig) -> Result<(), ValuesimError> {
    if config.clip_low >= config.clip_high {
        return Err(invalid(
            "clip_low",
            "clip_low must be below clip_high".to_string(),
        ));
    }
    Ok(())
}

fn validate_decision_day(config: &SimulationConfig) -> Result<(), ValuesimError> {
    if !(1..=31).contains(&config.decision_day) {
        return Err(invalid(
            "decision_day",
            "decision_day must be between 1 and 31".to_string(),
        ));
    }
    Ok(())
}
