use anyhow::Result;
use colored::Colorize;
use ebookai::scoring::score_content;
use ebookai::variations::{
    rank_variations, slot_label, Variation, VariationStyle,
};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Execute the compare command
///
/// Treats each file as one variation, labeled in argument order, and prints
/// the per-metric winners.
pub fn execute(files: &[PathBuf]) -> Result<()> {
    let mut variations = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let content = super::score::read_content(file)?;
        let metrics = score_content(&content);
        variations.push(Variation {
            id: Uuid::new_v4(),
            label: slot_label(index),
            // Styles are unknown for files read off disk; detailed is the
            // display default.
            style: VariationStyle::Detailed,
            temperature: 0.0,
            content,
            metrics,
        });
    }
    info!(count = variations.len(), "comparing variations");

    println!("{}", "Variations:".bold());
    for (variation, file) in variations.iter().zip(files) {
        println!(
            "  {}: {} — overall {:>3}, readability {:>3}, structure {:>3} ({} words)",
            variation.label.as_str().cyan(),
            file.display(),
            variation.metrics.overall_score,
            variation.metrics.readability_score,
            variation.metrics.structure_score,
            variation.metrics.word_count
        );
    }

    // At least two files are enforced by the CLI, so ranking cannot be empty
    if let Some(ranked) = rank_variations(&variations) {
        println!();
        println!("{}", "Best picks:".bold());
        println!(
            "  {}: {}",
            "Overall".green(),
            variations[ranked.best_overall].label
        );
        println!(
            "  {}: {}",
            "Readability".green(),
            variations[ranked.most_readable].label
        );
        println!(
            "  {}: {}",
            "Structure".green(),
            variations[ranked.best_structured].label
        );
    }

    Ok(())
}
