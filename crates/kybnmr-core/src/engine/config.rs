use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Unknown match policy '{0}' (expected 'first-match' or 'closest-match')")]
    UnknownMatchPolicy(String),
}

/// How a candidate is assigned when it is similar to more than one representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Merge into the first similar representative in scan order.
    #[default]
    FirstMatch,
    /// Merge into the similar representative with the smallest fingerprint deviation.
    /// Ties go to the earliest representative.
    ClosestMatch,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::FirstMatch => "first-match",
            MatchPolicy::ClosestMatch => "closest-match",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-match" | "first" => Ok(MatchPolicy::FirstMatch),
            "closest-match" | "closest" => Ok(MatchPolicy::ClosestMatch),
            _ => Err(ConfigError::UnknownMatchPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholds {
    /// Largest energy gap, in kcal/mol, for two structures to be considered duplicates.
    pub energy_kcal_mol: f64,
    /// Largest fingerprint deviation, in Angstroms, for two structures to be considered duplicates.
    pub distance_angstrom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleCheckConfig {
    pub thresholds: SimilarityThresholds,
    pub match_policy: MatchPolicy,
}

impl DoubleCheckConfig {
    /// Shorthand for a first-match configuration with the given thresholds.
    pub fn new(energy_threshold_kcal_mol: f64, distance_threshold_angstrom: f64) -> Self {
        Self {
            thresholds: SimilarityThresholds {
                energy_kcal_mol: energy_threshold_kcal_mol,
                distance_angstrom: distance_threshold_angstrom,
            },
            match_policy: MatchPolicy::default(),
        }
    }
}

#[derive(Default)]
pub struct DoubleCheckConfigBuilder {
    energy_threshold: Option<f64>,
    distance_threshold: Option<f64>,
    match_policy: Option<MatchPolicy>,
}

impl DoubleCheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn energy_threshold(mut self, kcal_mol: f64) -> Self {
        self.energy_threshold = Some(kcal_mol);
        self
    }
    pub fn distance_threshold(mut self, angstrom: f64) -> Self {
        self.distance_threshold = Some(angstrom);
        self
    }
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<DoubleCheckConfig, ConfigError> {
        let thresholds = SimilarityThresholds {
            energy_kcal_mol: self
                .energy_threshold
                .ok_or(ConfigError::MissingParameter("energy_threshold"))?,
            distance_angstrom: self
                .distance_threshold
                .ok_or(ConfigError::MissingParameter("distance_threshold"))?,
        };
        Ok(DoubleCheckConfig {
            thresholds,
            match_policy: self.match_policy.unwrap_or_default(),
        })
    }
}
