use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use deckweave_core::pipeline::{AugmentOptions, SpliceOutcome, SpliceSummary, augment};
use deckweave_core::print_banner;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

mod arguments;

use arguments::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !args.quiet {
        print_banner();
    }

    let deck_html = fs::read_to_string(&args.deck)
        .with_context(|| format!("Failed to read deck from {}", args.deck.display()))?;

    let mut options = AugmentOptions::new(&args.fragment_url);
    options.timeout_secs = args.timeout;
    options.seed = args.seed;

    let spinner = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Loading roadmap content...");
        Some(pb)
    };

    let (html, summary) = augment(&deck_html, &options).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    fs::write(&args.output, &html)
        .with_context(|| format!("Failed to write output to {}", args.output.display()))?;
    info!("Augmented deck written to {}", args.output.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !args.quiet {
        print_summary(&summary, &args.output);
    }

    Ok(())
}

fn print_summary(summary: &SpliceSummary, output: &Path) {
    println!("{}", "Augmentation complete".bold());
    println!("  Slides:          {}", summary.slide_count);
    println!("  Animated:        {} elements", summary.animatable_marked);
    println!("  Particle hosts:  {}", summary.particle_hosts);

    match &summary.outcome {
        SpliceOutcome::Loaded => {
            println!("  Roadmap:         {}", "loaded".green());
            for block in &summary.blocks {
                let mark = if block.found {
                    "found".green()
                } else {
                    "missing".yellow()
                };
                println!("    {:<16} {}", block.label, mark);
            }
        }
        SpliceOutcome::Error { message } => {
            println!("  Roadmap:         {} ({})", "error".red(), message);
        }
        SpliceOutcome::Skipped => {
            println!(
                "  Roadmap:         {}",
                "skipped (no target container)".yellow()
            );
        }
    }

    println!("  Output:          {}", output.display());
}
