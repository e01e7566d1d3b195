use anyhow::Result;
use clap::{Parser, Subcommand};
use recall_common::{logger, AppConfig};
use recall_embed::OllamaEmbedder;
use recall_index::{VectorIndex, DEFAULT_SCORE_THRESHOLD, DEFAULT_SEARCH_LIMIT};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Recall - in-memory vector similarity index for conversation memory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert sample conversations and run a query against them
    Demo {
        /// Query text
        #[arg(long, default_value = "travel to Japan")]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,

        /// Minimum similarity score
        #[arg(long, default_value_t = DEFAULT_SCORE_THRESHOLD)]
        threshold: f32,
    },

    /// Check the embedding backend connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    logger::setup_console_logging(&config.log_level)?;

    let cli = Cli::parse();
    let embedder = OllamaEmbedder::new(&config.ollama_base_url, &config.embedding_model)?;

    match cli.command {
        Commands::Demo {
            query,
            limit,
            threshold,
        } => {
            let index = VectorIndex::new(&config.collection_name, Arc::new(embedder));

            index
                .insert_conversation(
                    1,
                    "Trip planning",
                    "Plan a weekend in Kyoto",
                    Default::default(),
                )
                .await?;
            index
                .insert_conversation(2, "Recipe", "Bake sourdough bread", Default::default())
                .await?;
            index
                .insert_message(
                    1,
                    1,
                    "What is the best season to visit Kyoto?",
                    "Autumn, for the foliage around the temples.",
                    Default::default(),
                )
                .await?;

            let matches = index.search_conversations(&query, limit, threshold).await?;
            if matches.is_empty() {
                println!("No conversations matched '{}' at threshold {}", query, threshold);
            }
            for result in matches {
                println!(
                    "[{:.4}] conversation {} - {}: {}",
                    result.score, result.conversation_id, result.title, result.content
                );
            }

            let info = index.stats().await?;
            println!(
                "collection '{}': {} points, dim={}, distance={}",
                info.name, info.points_count, info.vector_size, info.distance
            );
        }
        Commands::Ping => {
            let ok = embedder.test_connection().await?;
            if ok {
                println!("Ollama is reachable at {}", config.ollama_base_url);
            } else {
                println!("Ollama responded with an error status");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
