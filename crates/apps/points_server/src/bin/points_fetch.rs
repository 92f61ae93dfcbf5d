use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dataset::{CategoryRegistry, ExpandOptions, PointCollection, TARGET_POINT_COUNT};
use loader::{HttpSeedSource, load_points};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch the seed asset and prepare the expanded point dataset")]
struct Args {
    /// Seed asset URL (default: the local points server)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the dataset and print a summary
    Stats {
        /// Number of points to expand to
        #[arg(long, default_value_t = TARGET_POINT_COUNT)]
        target: usize,
    },

    /// Load the dataset and write the expanded collection to a file
    Prepare {
        /// Number of points to expand to
        #[arg(long, default_value_t = TARGET_POINT_COUNT)]
        target: usize,

        /// Output path for the expanded collection
        #[arg(long, default_value = "data/points/expanded.json")]
        out: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let url = args.url.unwrap_or_else(|| {
        env::var("SEED_POINTS_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:9400/seed-points.json".to_string())
    });

    let registry = CategoryRegistry::builtin();

    match args.command {
        Command::Stats { target } => {
            let collection = fetch(&url, &registry, target).await?;
            print_stats(&collection, &registry);
        }
        Command::Prepare { target, out } => {
            let collection = fetch(&url, &registry, target).await?;
            let out_path = PathBuf::from(out);
            if let Some(parent) = out_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let payload = serde_json::to_string(&collection)?;
            tokio::fs::write(&out_path, &payload).await?;
            info!("wrote {:?} ({} points)", out_path, collection.items.len());
        }
    }

    Ok(())
}

async fn fetch(
    url: &str,
    registry: &CategoryRegistry,
    target: usize,
) -> Result<PointCollection, Box<dyn std::error::Error>> {
    info!("loading seed points from {url}");
    let source = HttpSeedSource::new(url);
    let collection = load_points(&source, registry, &ExpandOptions::new(target)).await?;
    info!(
        "prepared {} points, value domain {}..{}",
        collection.items.len(),
        collection.value_domain.min,
        collection.value_domain.max
    );
    Ok(collection)
}

fn print_stats(collection: &PointCollection, registry: &CategoryRegistry) {
    println!(
        "points\t{}\nvalue_domain\t{}..{}",
        collection.items.len(),
        collection.value_domain.min,
        collection.value_domain.max
    );
    for category in registry.categories() {
        let count = collection
            .items
            .iter()
            .filter(|p| p.category == category.id)
            .count();
        println!("category\t{}\t{count}", category.id);
    }
}
