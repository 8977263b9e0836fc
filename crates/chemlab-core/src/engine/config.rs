use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 20.0;
pub const DEFAULT_INITIAL_PH: f64 = 7.0;
pub const DEFAULT_MAX_TEMPERATURE: f64 = 300.0;
pub const DEFAULT_HEAT_INCREMENT: f64 = 50.0;
pub const DEFAULT_REACTION_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_STIR_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    pub initial_temperature: f64,
    pub initial_ph: f64,
    pub max_temperature: f64,
    pub heat_increment: f64,
    pub reaction_delay: Duration,
    pub stir_delay: Duration,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            initial_ph: DEFAULT_INITIAL_PH,
            max_temperature: DEFAULT_MAX_TEMPERATURE,
            heat_increment: DEFAULT_HEAT_INCREMENT,
            reaction_delay: DEFAULT_REACTION_DELAY,
            stir_delay: DEFAULT_STIR_DELAY,
        }
    }
}

#[derive(Default)]
pub struct LabConfigBuilder {
    initial_temperature: Option<f64>,
    initial_ph: Option<f64>,
    max_temperature: Option<f64>,
    heat_increment: Option<f64>,
    reaction_delay: Option<Duration>,
    stir_delay: Option<Duration>,
}

impl LabConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_temperature(mut self, celsius: f64) -> Self {
        self.initial_temperature = Some(celsius);
        self
    }
    pub fn initial_ph(mut self, ph: f64) -> Self {
        self.initial_ph = Some(ph);
        self
    }
    pub fn max_temperature(mut self, celsius: f64) -> Self {
        self.max_temperature = Some(celsius);
        self
    }
    pub fn heat_increment(mut self, celsius: f64) -> Self {
        self.heat_increment = Some(celsius);
        self
    }
    pub fn reaction_delay(mut self, delay: Duration) -> Self {
        self.reaction_delay = Some(delay);
        self
    }
    pub fn stir_delay(mut self, delay: Duration) -> Self {
        self.stir_delay = Some(delay);
        self
    }

    pub fn build(self) -> Result<LabConfig, ConfigError> {
        let config = LabConfig {
            initial_temperature: self
                .initial_temperature
                .ok_or(ConfigError::MissingParameter("initial_temperature"))?,
            initial_ph: self
                .initial_ph
                .ok_or(ConfigError::MissingParameter("initial_ph"))?,
            max_temperature: self
                .max_temperature
                .ok_or(ConfigError::MissingParameter("max_temperature"))?,
            heat_increment: self
                .heat_increment
                .ok_or(ConfigError::MissingParameter("heat_increment"))?,
            reaction_delay: self
                .reaction_delay
                .ok_or(ConfigError::MissingParameter("reaction_delay"))?,
            stir_delay: self
                .stir_delay
                .ok_or(ConfigError::MissingParameter("stir_delay"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl LabConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=14.0).contains(&self.initial_ph) {
            return Err(ConfigError::Invalid {
                parameter: "initial_ph",
                reason: format!("{} is outside the 0-14 pH scale", self.initial_ph),
            });
        }
        if !(self.heat_increment > 0.0) {
            return Err(ConfigError::Invalid {
                parameter: "heat_increment",
                reason: format!("{} must be positive", self.heat_increment),
            });
        }
        if !(self.max_temperature >= self.initial_temperature) {
            return Err(ConfigError::Invalid {
                parameter: "max_temperature",
                reason: format!(
                    "ceiling {} is below the initial temperature {}",
                    self.max_temperature, self.initial_temperature
                ),
            });
        }
        Ok(())
    }
}
