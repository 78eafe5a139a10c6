use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use engine::{RecommendOutcome, SimilarityEngine};
use std::path::PathBuf;
use std::time::Instant;

/// CineRecs - CBR film recommender
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Film recommendations by weighted case similarity", long_about = None)]
struct Cli {
    /// Path to the film catalog CSV
    #[arg(short, long, default_value = "data/movies.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the films most similar to a title
    Recommend {
        /// Film title (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        k: usize,
    },

    /// List catalog titles matching a search string
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of matches to list
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let engine = SimilarityEngine::with_defaults();

    // Load the catalog (schema follows the engine's weight configuration)
    println!("Loading film catalog from {}...", cli.data.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_file(&cli.data, &engine.config().schema())
        .with_context(|| format!("could not load film catalog from {}", cli.data.display()))?;
    println!(
        "{} Loaded {} films in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend { title, k } => handle_recommend(&engine, &catalog, &title, k),
        Commands::Search { title, limit } => handle_search(&catalog, &title, limit),
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(engine: &SimilarityEngine, catalog: &Catalog, title: &str, k: usize) {
    match engine.recommend(catalog, title, k) {
        RecommendOutcome::Found {
            query_title,
            results,
        } => {
            println!(
                "{}",
                format!("Recommendations for \"{}\":", query_title)
                    .bold()
                    .blue()
            );
            if results.is_empty() {
                println!("  (no other films in the catalog)");
                return;
            }
            for (rank, scored) in results.iter().enumerate() {
                println!(
                    "{}. {} {}",
                    (rank + 1).to_string().green(),
                    scored.title,
                    format!("similarity: {}%", scored.score_percent()).cyan()
                );
            }
        }
        RecommendOutcome::NotFound { query } => {
            println!("{}", format!("Film \"{}\" not found.", query).red());
        }
    }
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str, limit: usize) {
    let needle = title.to_lowercase();
    let matches: Vec<_> = catalog
        .films()
        .iter()
        .filter(|film| film.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect();

    println!(
        "{}",
        format!("Search results for '{}':", title).bold().blue()
    );
    if matches.is_empty() {
        println!("  (no matching titles)");
        return;
    }
    for film in matches {
        println!("  {} [{}]", film.title, film.genres.join(", "));
    }
}
