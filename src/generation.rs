use crate::scoring::score_content;
use crate::variations::{slot_label, Variation, VariationStyle};
use std::future::Future;
use uuid::Uuid;

/// Why a generation request produced no usable content.
///
/// Callers that want the old "demo text on any failure" behavior must opt in
/// explicitly via [`fallback_content`]; a fallback is never returned
/// disguised as real content.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },
    #[error("generation timed out")]
    Timeout,
    #[error("generation cancelled")]
    Cancelled,
    #[error("provider returned an empty completion")]
    EmptyCompletion,
}

/// One slot in a variation batch: a style and the temperature to sample at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSlot {
    pub style: VariationStyle,
    pub temperature: f32,
}

impl GenerationSlot {
    pub fn new(style: VariationStyle) -> Self {
        Self {
            style,
            temperature: style.default_temperature(),
        }
    }
}

/// The standard two-slot batch: detailed at low temperature, concise at high.
pub fn default_slots() -> Vec<GenerationSlot> {
    vec![
        GenerationSlot::new(VariationStyle::Detailed),
        GenerationSlot::new(VariationStyle::Concise),
    ]
}

/// Run every slot's generation request concurrently and score the results.
///
/// `request_fn` is the vendor-call collaborator: given a slot, it returns the
/// raw generated text or a [`GenerationError`]. Slots are independent, so all
/// requests are fired at once and awaited together; per-slot failures do not
/// abort the rest of the batch. Labels follow slot order, not completion
/// order.
pub async fn generate_variations<F, Fut>(
    slots: &[GenerationSlot],
    request_fn: F,
) -> Vec<Result<Variation, GenerationError>>
where
    F: Fn(GenerationSlot) -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let requests = slots.iter().map(|slot| request_fn(*slot));
    let outcomes = futures::future::join_all(requests).await;

    outcomes
        .into_iter()
        .zip(slots)
        .enumerate()
        .map(|(index, (outcome, slot))| match outcome {
            Ok(content) if content.trim().is_empty() => {
                tracing::warn!(slot = index, style = slot.style.as_str(), "empty completion");
                Err(GenerationError::EmptyCompletion)
            }
            Ok(content) => {
                let metrics = score_content(&content);
                tracing::debug!(
                    slot = index,
                    style = slot.style.as_str(),
                    overall = metrics.overall_score,
                    "variation scored"
                );
                Ok(Variation {
                    id: Uuid::new_v4(),
                    label: slot_label(index),
                    style: slot.style,
                    temperature: slot.temperature,
                    content,
                    metrics,
                })
            }
            Err(e) => {
                tracing::warn!(slot = index, style = slot.style.as_str(), error = %e, "generation failed");
                Err(e)
            }
        })
        .collect()
}

/// Canned placeholder content for a slot whose generation failed.
///
/// Kept deliberately recognizable as placeholder text. The type system makes
/// the substitution visible: this is only reachable after a caller has seen
/// the `Err` for the slot.
pub fn fallback_content(style: VariationStyle) -> String {
    match style {
        VariationStyle::Detailed => "<h2>Draft unavailable</h2>\
            <p>This section could not be generated. The outline below marks where \
            the detailed draft will go once generation succeeds.</p>\
            <h3>Planned coverage</h3>\
            <ul><li>Key concepts for this topic</li>\
            <li>Worked examples and supporting research</li>\
            <li>Summary and transitions to the next topic</li></ul>"
            .to_string(),
        VariationStyle::Concise => "<h2>Draft unavailable</h2>\
            <p>This section could not be generated. Retry to produce a concise \
            draft for this topic.</p>"
            .to_string(),
    }
}
