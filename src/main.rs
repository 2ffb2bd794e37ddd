use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use ebookai::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.command {
        cli::Commands::Estimate {
            provider,
            model,
            chapters,
            topics,
            words_per_topic,
            images_per_chapter,
            rag,
            json,
        } => {
            commands::estimate::execute(
                &args.config,
                commands::estimate::EstimateArgs {
                    provider,
                    model,
                    chapters,
                    topics,
                    words_per_topic,
                    images_per_chapter,
                    rag,
                    json,
                },
            )?;
        }
        cli::Commands::Score { file, json } => {
            commands::score::execute(&file, json)?;
        }
        cli::Commands::Compare { files } => {
            commands::compare::execute(&files)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("EbookAI content engine v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
