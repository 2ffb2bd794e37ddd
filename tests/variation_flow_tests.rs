/// Integration tests for the variation batch lifecycle: concurrent
/// generation, scoring, ranking, and selection.
use ebookai::generation::{
    default_slots, fallback_content, generate_variations, GenerationError, GenerationSlot,
};
use ebookai::variations::{
    rank_variations, BatchError, BatchState, VariationBatch, VariationStyle,
};

/// Long, well-structured draft: high structure, healthy sentence lengths.
fn structured_draft() -> String {
    let body = "This paragraph explains the topic with enough detail to count as a full draft for one section. "
        .repeat(12);
    format!("<h2>Topic</h2><h3>Background</h3><ul><li>key point</li></ul>{}", body)
}

/// Plain draft with choppy sentences: low readability, base structure.
fn choppy_draft() -> String {
    "Short. Very short. Too short. Still short. ".repeat(10)
}

#[tokio::test]
async fn test_full_batch_lifecycle() {
    let mut batch = VariationBatch::new();
    batch.begin().unwrap();

    let slots = default_slots();
    let results = generate_variations(&slots, |slot| async move {
        Ok(match slot.style {
            VariationStyle::Detailed => structured_draft(),
            VariationStyle::Concise => choppy_draft(),
        })
    })
    .await;

    let variations: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    batch.complete(variations).unwrap();
    assert_eq!(batch.state(), BatchState::Ready);

    let ranked = rank_variations(batch.variations()).unwrap();
    // The structured detailed draft wins everything here
    assert_eq!(ranked.best_overall, 0);
    assert_eq!(ranked.best_structured, 0);

    let winner_label = batch.variations()[ranked.best_overall].label.clone();
    let chosen = batch.select(&winner_label).unwrap();
    assert_eq!(chosen.label, "A");
    assert_eq!(batch.state(), BatchState::Selected);
}

#[tokio::test]
async fn test_ranking_splits_across_metrics() {
    // Slot A: ideal readability, no structure. Slot B: poor readability,
    // full structure.
    let readable = "This sentence has exactly the right number of words to land in the ideal band overall today. ".repeat(8);
    let structured = format!(
        "<h2>a</h2><h3>b</h3><ul><li>c</li></ul><blockquote>d</blockquote>{}",
        "Choppy. ".repeat(40)
    );

    let slots = default_slots();
    let results = generate_variations(&slots, |slot| {
        let readable = readable.clone();
        let structured = structured.clone();
        async move {
            Ok(match slot.style {
                VariationStyle::Detailed => readable,
                VariationStyle::Concise => structured,
            })
        }
    })
    .await;

    let variations: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    let ranked = rank_variations(&variations).unwrap();

    assert_eq!(ranked.most_readable, 0);
    assert_eq!(ranked.best_structured, 1);
    // Best overall is consistent with the independent per-metric maxima
    let best = &variations[ranked.best_overall];
    assert!(variations
        .iter()
        .all(|v| v.metrics.overall_score <= best.metrics.overall_score));
}

#[tokio::test]
async fn test_failed_slot_yields_explicit_error_and_fallback_is_opt_in() {
    let slots = default_slots();
    let results = generate_variations(&slots, |slot| async move {
        match slot.style {
            VariationStyle::Detailed => Ok(structured_draft()),
            VariationStyle::Concise => Err(GenerationError::Provider {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
        }
    })
    .await;

    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert!(matches!(err, GenerationError::Provider { status: 500, .. }));

    // A caller choosing to fall back does so knowingly, with recognizable
    // placeholder text
    let placeholder = fallback_content(slots[1].style);
    assert!(placeholder.contains("Draft unavailable"));
}

#[tokio::test]
async fn test_discard_before_completion_keeps_no_history() {
    let mut batch = VariationBatch::new();
    batch.begin().unwrap();
    batch.discard().unwrap();

    assert_eq!(batch.state(), BatchState::Discarded);
    assert!(batch.variations().is_empty());

    // A discarded batch is terminal; a fresh round means a fresh batch
    assert!(matches!(batch.begin(), Err(BatchError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_custom_slot_temperatures_are_preserved() {
    let slots = vec![
        GenerationSlot {
            style: VariationStyle::Detailed,
            temperature: 0.15,
        },
        GenerationSlot {
            style: VariationStyle::Detailed,
            temperature: 0.95,
        },
        GenerationSlot::new(VariationStyle::Concise),
    ];

    let results =
        generate_variations(&slots, |_| async { Ok(structured_draft()) }).await;
    let variations: Vec<_> = results.into_iter().map(Result::unwrap).collect();

    assert_eq!(variations[0].temperature, 0.15);
    assert_eq!(variations[1].temperature, 0.95);
    assert_eq!(variations[2].temperature, 0.8);
    assert_eq!(
        variations.iter().map(|v| v.label.as_str()).collect::<Vec<_>>(),
        vec!["A", "B", "C"]
    );
}

#[tokio::test]
async fn test_scoring_inside_generation_matches_direct_scoring() {
    let draft = structured_draft();
    let slots = vec![GenerationSlot::new(VariationStyle::Detailed)];
    let results = generate_variations(&slots, |_| {
        let draft = draft.clone();
        async move { Ok(draft) }
    })
    .await;

    let variation = results.into_iter().next().unwrap().unwrap();
    assert_eq!(variation.metrics, ebookai::scoring::score_content(&draft));
}
