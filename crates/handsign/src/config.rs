//! Runtime configuration of the detection pipeline.
//!
//! Defaults can be overridden through these environment variables:
//!
//! * `HANDSIGN_MIN_CONFIDENCE`: minimum score (non-negative) a gesture needs to be reported.
//!   Values above 1 are accepted and disable reporting entirely.
//! * `HANDSIGN_TICK_MS`: detection period in milliseconds.
//! * `HANDSIGN_DIRECTION_TOLERANCE`: half-width in degrees of the cardinal direction buckets, in
//!   range `(0, 45]`.

use std::{env, fmt, str::FromStr, time::Duration};

use anyhow::Context;

use crate::estimator::DEFAULT_MIN_CONFIDENCE;
use crate::pose::PoseOptions;

const MIN_CONFIDENCE_VAR: &str = "HANDSIGN_MIN_CONFIDENCE";
const TICK_MS_VAR: &str = "HANDSIGN_TICK_MS";
const DIRECTION_TOLERANCE_VAR: &str = "HANDSIGN_DIRECTION_TOLERANCE";

/// Configuration of a detection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pose: PoseOptions,
    min_confidence: f32,
    tick_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pose: PoseOptions::default(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            tick_period: Self::DEFAULT_TICK_PERIOD,
        }
    }
}

impl Config {
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

    /// Loads the default configuration with overrides from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_lookup(|var| env::var(var).ok())
            .context("invalid configuration in environment")?;
        log::debug!("{config:?}");
        Ok(config)
    }

    /// Loads the default configuration with overrides returned by `lookup`.
    ///
    /// `lookup` is called with the name of every supported environment variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(min) = parse::<f32>(&lookup, MIN_CONFIDENCE_VAR)? {
            if !(min >= 0.0) || min.is_infinite() {
                return Err(ConfigError::new(MIN_CONFIDENCE_VAR, min, "must be non-negative"));
            }
            config = config.min_confidence(min);
        }
        if let Some(ms) = parse::<u64>(&lookup, TICK_MS_VAR)? {
            if ms == 0 {
                return Err(ConfigError::new(TICK_MS_VAR, ms, "must be positive"));
            }
            config = config.tick_period(Duration::from_millis(ms));
        }
        if let Some(deg) = parse::<f32>(&lookup, DIRECTION_TOLERANCE_VAR)? {
            if !(deg > 0.0 && deg <= 45.0) {
                return Err(ConfigError::new(
                    DIRECTION_TOLERANCE_VAR,
                    deg,
                    "must be in range (0, 45]",
                ));
            }
            let pose = config.pose.direction_tolerance(deg);
            config = config.pose_options(pose);
        }

        Ok(config)
    }

    pub fn pose_options(self, pose: PoseOptions) -> Self {
        Self { pose, ..self }
    }

    /// Sets the minimum score a gesture needs to be reported.
    ///
    /// # Panics
    ///
    /// Panics if `min_confidence` is negative or NaN.
    pub fn min_confidence(self, min_confidence: f32) -> Self {
        assert!(
            min_confidence >= 0.0,
            "minimum confidence must be non-negative, got {min_confidence}"
        );
        Self {
            min_confidence,
            ..self
        }
    }

    /// Sets the detection period.
    ///
    /// # Panics
    ///
    /// Panics if `tick_period` is zero.
    pub fn tick_period(self, tick_period: Duration) -> Self {
        assert!(!tick_period.is_zero(), "tick period must be non-zero");
        Self {
            tick_period,
            ..self
        }
    }

    pub fn pose(&self) -> &PoseOptions {
        &self.pose
    }

    /// Returns the minimum score a gesture needs to be reported.
    pub fn threshold(&self) -> f32 {
        self.min_confidence
    }

    pub fn period(&self) -> Duration {
        self.tick_period
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e| ConfigError::new(var, &value, e))
}

/// An environment variable had an invalid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

impl ConfigError {
    fn new(var: &'static str, value: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns the name of the offending variable.
    pub fn var(&self) -> &str {
        self.var
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value set for `{}` variable: '{}' ({})",
            self.var, self.value, self.reason
        )
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.threshold(), 0.8);
        assert_eq!(config.period(), Duration::from_millis(100));
        assert_eq!(
            config.pose().tolerance(),
            PoseOptions::DEFAULT_DIRECTION_TOLERANCE
        );
    }

    #[test]
    fn overrides() {
        let config = load(&[
            (MIN_CONFIDENCE_VAR, "0.5"),
            (TICK_MS_VAR, " 250 "),
            (DIRECTION_TOLERANCE_VAR, "30"),
        ])
        .unwrap();
        assert_eq!(config.threshold(), 0.5);
        assert_eq!(config.period(), Duration::from_millis(250));
        assert_eq!(config.pose().tolerance(), 30.0);

        // Matches nothing, but is valid.
        let config = load(&[(MIN_CONFIDENCE_VAR, "1.5")]).unwrap();
        assert_eq!(config.threshold(), 1.5);
    }

    #[test]
    fn invalid_values() {
        for (var, value) in [
            (MIN_CONFIDENCE_VAR, "-0.1"),
            (MIN_CONFIDENCE_VAR, "NaN"),
            (MIN_CONFIDENCE_VAR, "high"),
            (TICK_MS_VAR, "0"),
            (TICK_MS_VAR, "-5"),
            (TICK_MS_VAR, "1.5"),
            (DIRECTION_TOLERANCE_VAR, "0"),
            (DIRECTION_TOLERANCE_VAR, "60"),
        ] {
            let err = load(&[(var, value)]).unwrap_err();
            assert_eq!(err.var(), var);
            assert!(err.to_string().contains(value), "{err}");
        }
    }

    #[test]
    #[should_panic]
    fn negative_confidence_panics() {
        Config::default().min_confidence(-1.0);
    }
}
