use anyhow::Result;
use colored::Colorize;
use ebookai::config::load_config;
use ebookai::cost::{cost_per_thousand_words, estimate_cost, EstimateParams};
use ebookai::volume::{estimate_volume, total_images, JobShape};
use std::path::Path;
use tracing::info;

pub struct EstimateArgs {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub chapters: u32,
    pub topics: u32,
    pub words_per_topic: Option<u32>,
    pub images_per_chapter: u32,
    pub rag: bool,
    pub json: bool,
}

/// Execute the estimate command
pub fn execute(config_path: &Path, args: EstimateArgs) -> Result<()> {
    let cfg = load_config(config_path)?;
    let table = cfg.pricing_table();

    let provider = args
        .provider
        .unwrap_or_else(|| cfg.generation.default_provider.clone());
    let model = args
        .model
        .unwrap_or_else(|| cfg.generation.default_model.clone());

    let shape = JobShape {
        chapters: args.chapters,
        topics_per_chapter: args.topics,
        words_per_topic: args
            .words_per_topic
            .unwrap_or(cfg.generation.default_words_per_topic),
        images_per_chapter: args.images_per_chapter,
    };
    let volume = estimate_volume(&shape);
    info!(provider = %provider, model = %model, words = volume.words, "estimating job cost");

    let params = EstimateParams {
        provider: provider.clone(),
        model: model.clone(),
        text_tokens: volume.tokens,
        total_words: volume.words,
        images: total_images(&shape),
        rag_enabled: args.rag,
    };
    let breakdown = estimate_cost(&table, &params);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    if table.model(&provider, &model).is_none() {
        println!(
            "{}",
            format!(
                "Warning: no pricing data for {}/{}; text cost shown as $0.00",
                provider, model
            )
            .yellow()
        );
        println!();
    }

    println!("{}", "Cost Estimate:".bold());
    println!("  {}: {} / {}", "Target".cyan(), provider, model);
    println!(
        "  {}: {} chapters × {} topics × {} words",
        "Volume".cyan(),
        shape.chapters,
        shape.topics_per_chapter,
        shape.words_per_topic
    );
    println!(
        "  {}: {} words (~{} tokens), {} images",
        "Totals".cyan(),
        breakdown.meta.total_words,
        breakdown.meta.total_tokens,
        breakdown.meta.total_images
    );
    println!();
    println!("  Text:   ${:.4}", breakdown.text_cost);
    println!("  Images: ${:.4}", breakdown.image_cost);
    if breakdown.meta.rag_enabled {
        println!("  RAG:    ${:.4} (included in text)", breakdown.rag_cost);
    }
    println!("  {} ${:.4}", "Total:".green().bold(), breakdown.total_cost);

    match cost_per_thousand_words(breakdown.total_cost, breakdown.meta.total_words) {
        Some(per_1k) => println!("  Per 1k words: ${:.4}", per_1k),
        None => println!("  Per 1k words: {}", "N/A".dimmed()),
    }

    Ok(())
}
