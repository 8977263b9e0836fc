use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use chemlab::engine::config::{LabConfig, LabConfigBuilder};
use chemlab::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialBeakerConfig {
    #[serde(rename = "initial-temperature")]
    initial_temperature: Option<f64>,
    #[serde(rename = "initial-ph")]
    initial_ph: Option<f64>,
    #[serde(rename = "max-temperature")]
    max_temperature: Option<f64>,
    #[serde(rename = "heat-increment")]
    heat_increment: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTimingConfig {
    #[serde(rename = "reaction-delay-ms")]
    reaction_delay_ms: Option<u64>,
    #[serde(rename = "stir-delay-ms")]
    stir_delay_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialLabConfig {
    beaker: Option<PartialBeakerConfig>,
    timing: Option<PartialTimingConfig>,
}

impl PartialLabConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading lab configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Defaults < file < explicit flags < `--set` overrides.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<LabConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = LabConfig::default();
        let beaker = self.beaker.take().unwrap_or_default();
        let timing = self.timing.take().unwrap_or_default();

        let pick = |set: bool, cli: Option<f64>, file: Option<f64>| {
            if set { file.or(cli) } else { cli.or(file) }
        };
        let set_keys: Vec<&str> = args
            .set_values
            .iter()
            .filter_map(|kv| kv.split_once('=').map(|(k, _)| k))
            .collect();
        let is_set = |key: &str| set_keys.contains(&key);

        let initial_temperature = pick(
            is_set("beaker.initial-temperature"),
            args.initial_temperature,
            beaker.initial_temperature,
        )
        .unwrap_or(defaults.initial_temperature);
        let max_temperature = pick(
            is_set("beaker.max-temperature"),
            args.max_temperature,
            beaker.max_temperature,
        )
        .unwrap_or(defaults.max_temperature);
        let heat_increment = pick(
            is_set("beaker.heat-increment"),
            args.heat_increment,
            beaker.heat_increment,
        )
        .unwrap_or(defaults.heat_increment);
        let initial_ph = beaker.initial_ph.unwrap_or(defaults.initial_ph);

        let reaction_delay = if is_set("timing.reaction-delay-ms") {
            timing.reaction_delay_ms.or(args.reaction_delay_ms)
        } else {
            args.reaction_delay_ms.or(timing.reaction_delay_ms)
        }
        .map(Duration::from_millis)
        .unwrap_or(defaults.reaction_delay);
        let stir_delay = if is_set("timing.stir-delay-ms") {
            timing.stir_delay_ms.or(args.stir_delay_ms)
        } else {
            args.stir_delay_ms.or(timing.stir_delay_ms)
        }
        .map(Duration::from_millis)
        .unwrap_or(defaults.stir_delay);

        LabConfigBuilder::new()
            .initial_temperature(initial_temperature)
            .initial_ph(initial_ph)
            .max_temperature(max_temperature)
            .heat_increment(heat_increment)
            .reaction_delay(reaction_delay)
            .stir_delay(stir_delay)
            .build()
            .map_err(|e| EngineError::from(e).into())
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            let float = || {
                value_str.parse::<f64>().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })
            };
            let millis = || {
                value_str.parse::<u64>().map_err(|_| {
                    CliError::Config(format!(
                        "Invalid millisecond value for {}: {}",
                        key, value_str
                    ))
                })
            };

            match key {
                "beaker.initial-temperature" => {
                    self.beaker
                        .get_or_insert_with(Default::default)
                        .initial_temperature = Some(float()?);
                }
                "beaker.initial-ph" => {
                    self.beaker.get_or_insert_with(Default::default).initial_ph = Some(float()?);
                }
                "beaker.max-temperature" => {
                    self.beaker
                        .get_or_insert_with(Default::default)
                        .max_temperature = Some(float()?);
                }
                "beaker.heat-increment" => {
                    self.beaker
                        .get_or_insert_with(Default::default)
                        .heat_increment = Some(float()?);
                }
                "timing.reaction-delay-ms" => {
                    self.timing
                        .get_or_insert_with(Default::default)
                        .reaction_delay_ms = Some(millis()?);
                }
                "timing.stir-delay-ms" => {
                    self.timing
                        .get_or_insert_with(Default::default)
                        .stir_delay_ms = Some(millis()?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

pub fn build_config(args: &RunArgs) -> Result<LabConfig> {
    let partial = match &args.config {
        Some(path) => PartialLabConfig::from_file(path)?,
        None => PartialLabConfig::default(),
    };
    partial.merge_with_cli(args)
}
