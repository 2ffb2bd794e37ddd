use crate::pricing::{PricingTable, ProviderPricing};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
    /// Per-provider pricing overrides, deep-merged over the builtin table.
    #[serde(default)]
    pub pricing: HashMap<String, ProviderPricing>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub default_provider: String,
    pub default_model: String,
    /// Words per topic used when the book form leaves it blank.
    pub default_words_per_topic: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    pub poll_initial_ms: u64,
    pub poll_max_ms: u64,
    pub poll_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: "openai".to_string(),
            default_model: "gpt-4o".to_string(),
            default_words_per_topic: 500,
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            poll_initial_ms: 500,
            poll_max_ms: 8_000,
            poll_timeout_secs: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            jobs: JobsConfig::default(),
            pricing: HashMap::new(),
        }
    }
}

impl Config {
    /// Build the effective pricing table: builtin rates with any configured
    /// overrides merged on top.
    pub fn pricing_table(&self) -> PricingTable {
        let mut table = PricingTable::builtin();
        table.merge(self.pricing.clone());
        table
    }

    pub fn poll_policy(&self) -> crate::jobs::PollPolicy {
        crate::jobs::PollPolicy {
            initial: std::time::Duration::from_millis(self.jobs.poll_initial_ms),
            max: std::time::Duration::from_millis(self.jobs.poll_max_ms),
            multiplier: 2.0,
            timeout: std::time::Duration::from_secs(self.jobs.poll_timeout_secs),
        }
    }
}

/// Load configuration from an optional TOML file plus `EBOOKAI__*`
/// environment overrides. A missing file falls back to the embedded
/// defaults, so the CLI works out of the box.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("EBOOKAI").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.generation.default_provider.is_empty() {
        anyhow::bail!("Default provider cannot be empty");
    }
    if cfg.generation.default_model.is_empty() {
        anyhow::bail!("Default model cannot be empty");
    }
    if cfg.generation.default_words_per_topic == 0 {
        anyhow::bail!("Default words per topic must be positive");
    }
    if cfg.jobs.poll_initial_ms == 0 {
        anyhow::bail!("Poll interval must be positive");
    }
    if cfg.jobs.poll_max_ms < cfg.jobs.poll_initial_ms {
        anyhow::bail!("Max poll interval must be at least the initial interval");
    }

    for (provider, pricing) in &cfg.pricing {
        for (model, rates) in &pricing.models {
            if rates.input_per_1k < 0.0 || rates.output_per_1k < 0.0 {
                anyhow::bail!("Negative rate for {}/{}", provider, model);
            }
        }
        if let Some(image) = &pricing.image {
            if image.per_image < 0.0 {
                anyhow::bail!("Negative image rate for {}", provider);
            }
        }
    }

    Ok(())
}
