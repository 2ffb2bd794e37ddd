use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-1k-token rates for a single text model, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl ModelPricing {
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }
}

/// Flat per-image rate for a provider's image model, in USD.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagePricing {
    pub model: Option<String>,
    pub per_image: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderPricing {
    #[serde(default)]
    pub models: HashMap<String, ModelPricing>,
    #[serde(default)]
    pub image: Option<ImagePricing>,
}

/// Pricing catalog keyed by provider name, then model name.
///
/// Loaded once at process start and treated as immutable afterwards. Lookups
/// for unknown providers or models return `None` rather than erroring: a
/// missing rate must never block an estimate from being displayed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PricingTable {
    providers: HashMap<String, ProviderPricing>,
}

impl PricingTable {
    /// Built-in catalog covering the three supported providers.
    ///
    /// Rates are USD per 1k tokens, mirroring the published provider pricing
    /// sheets. Only OpenAI carries an image model.
    pub fn builtin() -> Self {
        let mut providers = HashMap::new();

        let mut openai = ProviderPricing::default();
        openai
            .models
            .insert("gpt-4".to_string(), ModelPricing::new(0.03, 0.06));
        openai
            .models
            .insert("gpt-4-turbo".to_string(), ModelPricing::new(0.01, 0.03));
        openai
            .models
            .insert("gpt-4o".to_string(), ModelPricing::new(0.0025, 0.01));
        openai
            .models
            .insert("gpt-4o-mini".to_string(), ModelPricing::new(0.00015, 0.0006));
        openai
            .models
            .insert("gpt-3.5-turbo".to_string(), ModelPricing::new(0.0005, 0.0015));
        openai.image = Some(ImagePricing {
            model: Some("dall-e-3".to_string()),
            per_image: 0.04,
        });
        providers.insert("openai".to_string(), openai);

        let mut anthropic = ProviderPricing::default();
        anthropic
            .models
            .insert("claude-3-opus".to_string(), ModelPricing::new(0.015, 0.075));
        anthropic.models.insert(
            "claude-3-5-sonnet".to_string(),
            ModelPricing::new(0.003, 0.015),
        );
        anthropic.models.insert(
            "claude-3-haiku".to_string(),
            ModelPricing::new(0.00025, 0.00125),
        );
        providers.insert("anthropic".to_string(), anthropic);

        let mut openrouter = ProviderPricing::default();
        openrouter.models.insert(
            "meta-llama/llama-3.1-70b-instruct".to_string(),
            ModelPricing::new(0.0005, 0.0008),
        );
        openrouter.models.insert(
            "mistralai/mixtral-8x7b-instruct".to_string(),
            ModelPricing::new(0.0005, 0.0005),
        );
        openrouter.models.insert(
            "google/gemini-pro-1.5".to_string(),
            ModelPricing::new(0.00125, 0.005),
        );
        providers.insert("openrouter".to_string(), openrouter);

        Self { providers }
    }

    /// Merge overrides from configuration into this table.
    ///
    /// Overrides are applied per model, so a config file can re-price a
    /// single model without restating the whole provider block.
    pub fn merge(&mut self, overrides: HashMap<String, ProviderPricing>) {
        for (name, incoming) in overrides {
            let entry = self.providers.entry(name).or_default();
            entry.models.extend(incoming.models);
            if incoming.image.is_some() {
                entry.image = incoming.image;
            }
        }
    }

    pub fn model(&self, provider: &str, model: &str) -> Option<&ModelPricing> {
        self.providers.get(provider)?.models.get(model)
    }

    pub fn image(&self, provider: &str) -> Option<&ImagePricing> {
        self.providers.get(provider)?.image.as_ref()
    }

    pub fn providers(&self) -> impl Iterator<Item = (&String, &ProviderPricing)> {
        self.providers.iter()
    }
}
