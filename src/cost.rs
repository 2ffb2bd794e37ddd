use crate::pricing::PricingTable;
use serde::Serialize;

/// Share of the token budget attributed to the prompt side. The remainder is
/// billed at the completion rate. Fixed for the domain rather than measured
/// per request.
const INPUT_TOKEN_RATIO: f64 = 0.3;

/// Flat surcharge applied when a knowledge base feeds retrieval context into
/// the prompt.
const RAG_SURCHARGE: f64 = 1.2;

/// Inputs for one pre-submission estimate.
#[derive(Debug, Clone)]
pub struct EstimateParams {
    pub provider: String,
    pub model: String,
    /// Expected total token volume for the job, typically derived from a
    /// [`crate::volume::TextVolume`].
    pub text_tokens: u64,
    /// Word count backing `text_tokens`, carried through for display.
    pub total_words: u64,
    pub images: u32,
    pub rag_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostMeta {
    pub total_words: u64,
    pub total_tokens: u64,
    pub total_images: u32,
    pub rag_enabled: bool,
}

/// Result of one estimate. Never mutated after construction; recomputed from
/// scratch whenever an input changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub text_cost: f64,
    pub image_cost: f64,
    /// Informational delta attributable to the RAG surcharge, computed on the
    /// pre-surcharge text cost. Already folded into `text_cost`.
    pub rag_cost: f64,
    pub total_cost: f64,
    pub meta: CostMeta,
}

/// Compute a deterministic dollar estimate for a generation job.
///
/// This is a total function: unknown providers or models contribute a zero
/// cost term instead of failing, so an estimate can always be displayed. The
/// token volume is split 30/70 between prompt and completion rates, and an
/// enabled knowledge base adds a flat 20% surcharge to the whole base.
pub fn estimate_cost(table: &PricingTable, params: &EstimateParams) -> CostBreakdown {
    let input_tokens = params.text_tokens as f64 * INPUT_TOKEN_RATIO;
    let output_tokens = params.text_tokens as f64 * (1.0 - INPUT_TOKEN_RATIO);

    let base_text = match table.model(&params.provider, &params.model) {
        Some(pricing) => {
            (input_tokens / 1000.0) * pricing.input_per_1k
                + (output_tokens / 1000.0) * pricing.output_per_1k
        }
        None => 0.0,
    };

    let base_image = match table.image(&params.provider) {
        Some(image) => f64::from(params.images) * image.per_image,
        None => 0.0,
    };

    let (text_cost, image_cost, rag_cost) = if params.rag_enabled {
        (
            base_text * RAG_SURCHARGE,
            base_image * RAG_SURCHARGE,
            base_text * (RAG_SURCHARGE - 1.0),
        )
    } else {
        (base_text, base_image, 0.0)
    };

    CostBreakdown {
        text_cost,
        image_cost,
        rag_cost,
        total_cost: text_cost + image_cost,
        meta: CostMeta {
            total_words: params.total_words,
            total_tokens: params.text_tokens,
            total_images: params.images,
            rag_enabled: params.rag_enabled,
        },
    }
}

/// Cost per 1000 words, or `None` when the job has no words. Callers render
/// `None` as "N/A" instead of dividing by zero.
pub fn cost_per_thousand_words(total_cost: f64, total_words: u64) -> Option<f64> {
    if total_words == 0 {
        return None;
    }
    Some(total_cost / (total_words as f64 / 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tokens: u64, images: u32, rag: bool) -> EstimateParams {
        EstimateParams {
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            text_tokens: tokens,
            total_words: tokens * 3 / 4,
            images,
            rag_enabled: rag,
        }
    }

    #[test]
    fn test_gpt4_worked_example() {
        // 10k tokens at gpt-4 rates: 3k input * 0.03 + 7k output * 0.06
        let breakdown = estimate_cost(&PricingTable::builtin(), &params(10_000, 5, false));
        assert!((breakdown.text_cost - 0.51).abs() < 1e-9);
        assert!((breakdown.image_cost - 0.20).abs() < 1e-9);
        assert!((breakdown.total_cost - 0.71).abs() < 1e-9);
        assert_eq!(breakdown.rag_cost, 0.0);
    }

    #[test]
    fn test_rag_applies_flat_20_percent_surcharge() {
        let table = PricingTable::builtin();
        let without = estimate_cost(&table, &params(10_000, 5, false));
        let with = estimate_cost(&table, &params(10_000, 5, true));

        assert!((with.total_cost - without.total_cost * 1.2).abs() < 1e-9);
        assert!((with.rag_cost - 0.51 * 0.2).abs() < 1e-9);
        // The invariant total == text + image holds in both modes
        assert!((with.total_cost - (with.text_cost + with.image_cost)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_model_degrades_to_zero_text_cost() {
        let table = PricingTable::builtin();
        let mut p = params(10_000, 2, false);
        p.model = "gpt-99".to_string();

        let breakdown = estimate_cost(&table, &p);
        assert_eq!(breakdown.text_cost, 0.0);
        // Image pricing is independent of the text model lookup
        assert!((breakdown.image_cost - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_provider_is_all_zero() {
        let table = PricingTable::builtin();
        let mut p = params(10_000, 2, true);
        p.provider = "nonexistent".to_string();

        let breakdown = estimate_cost(&table, &p);
        assert_eq!(breakdown.total_cost, 0.0);
        assert_eq!(breakdown.rag_cost, 0.0);
    }

    #[test]
    fn test_provider_without_image_model_charges_nothing_for_images() {
        let table = PricingTable::builtin();
        let p = EstimateParams {
            provider: "anthropic".to_string(),
            model: "claude-3-opus".to_string(),
            text_tokens: 1000,
            total_words: 750,
            images: 10,
            rag_enabled: false,
        };

        let breakdown = estimate_cost(&table, &p);
        assert_eq!(breakdown.image_cost, 0.0);
        assert!(breakdown.text_cost > 0.0);
    }

    #[test]
    fn test_zero_volume_job_costs_nothing() {
        let breakdown = estimate_cost(&PricingTable::builtin(), &params(0, 0, true));
        assert_eq!(breakdown.total_cost, 0.0);
        assert_eq!(breakdown.meta.total_tokens, 0);
    }

    #[test]
    fn test_cost_per_thousand_words_guards_zero() {
        assert_eq!(cost_per_thousand_words(0.71, 0), None);
        let per_1k = cost_per_thousand_words(0.71, 7500).unwrap();
        assert!((per_1k - 0.71 / 7.5).abs() < 1e-9);
    }
}
