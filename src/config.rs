use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::RankingOptions;
use crate::error::MatchingError;
use crate::models::MatchingWeights;

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: f64,
    #[serde(default = "default_shortlist_size")]
    #[validate(range(min = 1))]
    pub shortlist_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            shortlist_size: default_shortlist_size(),
        }
    }
}

impl MatchingSettings {
    /// Reject thresholds that would empty every shortlist
    pub fn check(&self) -> Result<(), MatchingError> {
        // NaN slips through range comparisons
        if self.min_score.is_nan() {
            let mut errors = ValidationErrors::new();
            errors.add("min_score", ValidationError::new("range"));
            return Err(MatchingError::InvalidSettings(errors));
        }

        self.validate().map_err(MatchingError::InvalidSettings)
    }

    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            min_score: self.min_score,
            shortlist_size: self.shortlist_size,
        }
    }
}

fn default_min_score() -> f64 { 60.0 }
fn default_shortlist_size() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_industry_weight")]
    pub industry: f64,
    #[serde(default = "default_communication_weight")]
    pub communication: f64,
    #[serde(default = "default_timezone_weight")]
    pub timezone: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            experience: default_experience_weight(),
            industry: default_industry_weight(),
            communication: default_communication_weight(),
            timezone: default_timezone_weight(),
            availability: default_availability_weight(),
        }
    }
}

impl From<WeightsConfig> for MatchingWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            skills: config.skills,
            experience: config.experience,
            industry: config.industry,
            communication: config.communication,
            timezone: config.timezone,
            availability: config.availability,
        }
    }
}

fn default_skills_weight() -> f64 { 0.40 }
fn default_experience_weight() -> f64 { 0.20 }
fn default_industry_weight() -> f64 { 0.15 }
fn default_communication_weight() -> f64 { 0.10 }
fn default_timezone_weight() -> f64 { 0.10 }
fn default_availability_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH), including a `.env` file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenv::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SCORING__WEIGHTS__SKILLS -> scoring.weights.skills
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Parse settings from an inline TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
