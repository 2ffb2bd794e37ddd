use crate::scoring::ContentMetrics;
use serde::Serialize;
use uuid::Uuid;

/// Sampling style for one generation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationStyle {
    Detailed,
    Concise,
}

impl VariationStyle {
    /// Default sampling temperature per style: detailed runs cooler for
    /// coverage, concise runs hotter for variety.
    pub fn default_temperature(self) -> f32 {
        match self {
            Self::Detailed => 0.4,
            Self::Concise => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detailed => "detailed",
            Self::Concise => "concise",
        }
    }
}

/// One candidate generation of a topic, held only while the user is choosing.
#[derive(Debug, Clone, Serialize)]
pub struct Variation {
    pub id: Uuid,
    /// Display label, assigned A, B, C... in generation order.
    pub label: String,
    pub style: VariationStyle,
    pub temperature: f32,
    pub content: String,
    pub metrics: ContentMetrics,
}

/// Label for the nth slot in a batch: A, B, ... Z, AA, AB, ...
///
/// Labels never collide, so selection by label stays unambiguous no matter
/// how large a batch gets.
pub fn slot_label(index: usize) -> String {
    let mut label = String::new();
    let mut n = index;
    loop {
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label
}

/// Winners of the per-metric scans over a batch, as indices into the input
/// slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedVariations {
    pub best_overall: usize,
    pub most_readable: usize,
    pub best_structured: usize,
}

/// Pick the best variation per metric.
///
/// Each winner is the strict maximum of its metric; ties keep the variation
/// generated first. Returns `None` for an empty batch.
pub fn rank_variations(variations: &[Variation]) -> Option<RankedVariations> {
    if variations.is_empty() {
        return None;
    }

    let best_by = |metric: fn(&ContentMetrics) -> u8| {
        let mut best = 0;
        for (i, v) in variations.iter().enumerate().skip(1) {
            if metric(&v.metrics) > metric(&variations[best].metrics) {
                best = i;
            }
        }
        best
    };

    Some(RankedVariations {
        best_overall: best_by(|m| m.overall_score),
        most_readable: best_by(|m| m.readability_score),
        best_structured: best_by(|m| m.structure_score),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    Idle,
    Generating,
    Ready,
    Selected,
    Discarded,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("invalid batch transition: {from:?} -> {to:?}")]
    InvalidTransition { from: BatchState, to: BatchState },
    #[error("no variation labeled '{0}' in this batch")]
    UnknownLabel(String),
}

/// One round of candidate generations for a single topic.
///
/// Lifecycle: `Idle -> Generating -> Ready -> (Selected | Discarded)`.
/// Requesting a fresh round before selecting discards the current one;
/// discarded batches keep no history.
#[derive(Debug)]
pub struct VariationBatch {
    id: Uuid,
    state: BatchState,
    variations: Vec<Variation>,
}

impl VariationBatch {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: BatchState::Idle,
            variations: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    /// Mark the batch as generating. Valid from `Idle` only.
    pub fn begin(&mut self) -> Result<(), BatchError> {
        self.transition(BatchState::Idle, BatchState::Generating)
    }

    /// Attach the generated variations and mark the batch ready.
    pub fn complete(&mut self, variations: Vec<Variation>) -> Result<(), BatchError> {
        self.transition(BatchState::Generating, BatchState::Ready)?;
        self.variations = variations;
        Ok(())
    }

    /// Select a variation by label, consuming the batch's candidates and
    /// returning the chosen one for persistence by the caller.
    pub fn select(&mut self, label: &str) -> Result<Variation, BatchError> {
        if self.state != BatchState::Ready {
            return Err(BatchError::InvalidTransition {
                from: self.state,
                to: BatchState::Selected,
            });
        }
        let index = self
            .variations
            .iter()
            .position(|v| v.label == label)
            .ok_or_else(|| BatchError::UnknownLabel(label.to_string()))?;

        self.state = BatchState::Selected;
        let chosen = self.variations.swap_remove(index);
        self.variations.clear();
        Ok(chosen)
    }

    /// Drop all candidates. Valid while generating (user requested a fresh
    /// batch mid-flight) or once ready.
    pub fn discard(&mut self) -> Result<(), BatchError> {
        match self.state {
            BatchState::Generating | BatchState::Ready => {
                self.state = BatchState::Discarded;
                self.variations.clear();
                Ok(())
            }
            from => Err(BatchError::InvalidTransition {
                from,
                to: BatchState::Discarded,
            }),
        }
    }

    fn transition(&mut self, expect: BatchState, to: BatchState) -> Result<(), BatchError> {
        if self.state != expect {
            return Err(BatchError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

impl Default for VariationBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_content;

    fn variation(label: &str, metrics: ContentMetrics) -> Variation {
        Variation {
            id: Uuid::new_v4(),
            label: label.to_string(),
            style: VariationStyle::Detailed,
            temperature: 0.4,
            content: String::new(),
            metrics,
        }
    }

    fn metrics(readability: u8, structure: u8) -> ContentMetrics {
        ContentMetrics {
            word_count: 500,
            readability_score: readability,
            structure_score: structure,
            overall_score: ((u16::from(readability) + u16::from(structure) + 1) / 2) as u8,
        }
    }

    #[test]
    fn test_rank_picks_independent_maxima() {
        // A: most readable. B: best overall and best structured.
        let batch = vec![
            variation("A", metrics(90, 50)),
            variation("B", metrics(75, 100)),
            variation("C", metrics(60, 60)),
        ];
        let ranked = rank_variations(&batch).unwrap();
        assert_eq!(ranked.best_overall, 1);
        assert_eq!(ranked.most_readable, 0);
        assert_eq!(ranked.best_structured, 1);
    }

    #[test]
    fn test_rank_ties_keep_first_seen() {
        let batch = vec![
            variation("A", metrics(75, 75)),
            variation("B", metrics(75, 75)),
        ];
        let ranked = rank_variations(&batch).unwrap();
        assert_eq!(ranked.best_overall, 0);
        assert_eq!(ranked.most_readable, 0);
        assert_eq!(ranked.best_structured, 0);
    }

    #[test]
    fn test_rank_empty_batch_is_none() {
        assert!(rank_variations(&[]).is_none());
    }

    #[test]
    fn test_slot_labels_follow_generation_order() {
        assert_eq!(slot_label(0), "A");
        assert_eq!(slot_label(1), "B");
        assert_eq!(slot_label(2), "C");
        assert_eq!(slot_label(25), "Z");
    }

    #[test]
    fn test_slot_labels_never_collide_past_z() {
        assert_eq!(slot_label(26), "AA");
        assert_eq!(slot_label(27), "AB");
        assert_eq!(slot_label(51), "AZ");
        assert_eq!(slot_label(52), "BA");

        let labels: Vec<String> = (0..100).map(slot_label).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }

    #[test]
    fn test_select_works_past_26_slots() {
        let mut batch = VariationBatch::new();
        batch.begin().unwrap();
        let variations: Vec<Variation> = (0..30)
            .map(|i| variation(&slot_label(i), metrics(75, 75)))
            .collect();
        batch.complete(variations).unwrap();

        let chosen = batch.select("AC").unwrap();
        assert_eq!(chosen.label, "AC");
    }

    #[test]
    fn test_batch_happy_path() {
        let mut batch = VariationBatch::new();
        assert_eq!(batch.state(), BatchState::Idle);

        batch.begin().unwrap();
        assert_eq!(batch.state(), BatchState::Generating);

        let m = score_content("Some generated text for the topic goes here today.");
        batch
            .complete(vec![variation("A", m), variation("B", m)])
            .unwrap();
        assert_eq!(batch.state(), BatchState::Ready);
        assert_eq!(batch.variations().len(), 2);

        let chosen = batch.select("B").unwrap();
        assert_eq!(chosen.label, "B");
        assert_eq!(batch.state(), BatchState::Selected);
        // Unselected candidates are dropped
        assert!(batch.variations().is_empty());
    }

    #[test]
    fn test_discard_mid_generation() {
        let mut batch = VariationBatch::new();
        batch.begin().unwrap();
        batch.discard().unwrap();
        assert_eq!(batch.state(), BatchState::Discarded);
    }

    #[test]
    fn test_invalid_transitions_are_errors() {
        let mut batch = VariationBatch::new();
        assert!(matches!(
            batch.complete(vec![]),
            Err(BatchError::InvalidTransition { .. })
        ));
        assert!(matches!(
            batch.discard(),
            Err(BatchError::InvalidTransition { .. })
        ));

        batch.begin().unwrap();
        assert!(matches!(batch.begin(), Err(BatchError::InvalidTransition { .. })));
    }

    #[test]
    fn test_select_unknown_label() {
        let mut batch = VariationBatch::new();
        batch.begin().unwrap();
        batch
            .complete(vec![variation("A", metrics(75, 75))])
            .unwrap();
        assert!(matches!(batch.select("Z"), Err(BatchError::UnknownLabel(_))));
    }
}
