use anyhow::{Context, Result};
use colored::Colorize;
use ebookai::scoring::{score_content, suggest_improvements, Priority};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Execute the score command
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let content = read_content(file)?;
    let metrics = score_content(&content);
    let suggestions = suggest_improvements(&content, &metrics);
    info!(words = metrics.word_count, overall = metrics.overall_score, "content scored");

    if json {
        let payload = serde_json::json!({
            "metrics": metrics,
            "suggestions": suggestions,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", "Content Metrics:".bold());
    println!("  {}: {}", "Words".cyan(), metrics.word_count);
    println!("  {}: {}", "Readability".cyan(), colorize_score(metrics.readability_score));
    println!("  {}: {}", "Structure".cyan(), colorize_score(metrics.structure_score));
    println!("  {}: {}", "Overall".cyan(), colorize_score(metrics.overall_score));

    if suggestions.is_empty() {
        println!();
        println!("{}", "No improvements suggested".green());
        return Ok(());
    }

    println!();
    println!("{}", "Suggestions:".bold());
    for suggestion in &suggestions {
        let tag = match suggestion.priority {
            Priority::High => "high".red(),
            Priority::Medium => "medium".yellow(),
            Priority::Low => "low".dimmed(),
        };
        println!("  [{}] {}", tag, suggestion.message);
    }

    Ok(())
}

pub(crate) fn read_content(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read content from stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read content file: {}", file.display()))
    }
}

fn colorize_score(score: u8) -> colored::ColoredString {
    let text = format!("{}/100", score);
    if score >= 80 {
        text.green()
    } else if score >= 60 {
        text.yellow()
    } else {
        text.red()
    }
}
