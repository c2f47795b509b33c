use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use channel_search::api;
use channel_search::config::Config;
use channel_search::search::render::SearchView;
use channel_search::search::strategy::{AggregationMethod, SearchPreset};
use channel_search::state::ClientState;

/// Register YouTube channels and search their transcripts
#[derive(Parser, Debug)]
#[command(name = "channel-search", author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the search engine API
    #[arg(long, global = true, env = "CHANNEL_SEARCH_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered channels
    Channels,
    /// Register a channel by URL
    Add { url: String },
    /// Remove a channel by id
    Remove { id: String },
    /// Reindex every registered channel
    Reindex,
    /// Search transcripts
    Search {
        query: String,
        /// Retrieval preset
        #[arg(short, long, value_enum)]
        method: Option<SearchPreset>,
        /// Override the preset's aggregation (single, linear, rank_fusion, cascade)
        #[arg(long)]
        aggregation: Option<AggregationMethod>,
        /// Do not let the engine answer from its cache
        #[arg(long)]
        no_cache: bool,
        /// Ask the engine for a generated summary
        #[arg(long)]
        ai_assist: bool,
        /// Print the engine's markup instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Autocomplete a query prefix
    Suggest { prefix: String },
    /// Record that a suggested phrase was chosen
    Click { phrase: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Command::Search {
        no_cache, ai_assist, ..
    } = &cli.command
    {
        config.caching &= !*no_cache;
        config.ai_assist |= *ai_assist;
    }
    tracing::debug!("Search engine API: {}", config.api_base_url);

    let state = ClientState::new(config).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Channels => {
            api::channels::refresh_channels(&state).await?;
            print_channels(&state);
        }
        Command::Add { url } => {
            state.registry.write().set_url_input(url);
            if !state.registry.read().can_add() {
                anyhow::bail!("Channel URL is required");
            }
            match api::channels::add_channel(&state).await? {
                None => anyhow::bail!("Channel URL is required"),
                Some(outcome) => {
                    println!(
                        "Added channel: {} of {} videos indexed ({} failed)",
                        outcome.indexed_count, outcome.total_videos, outcome.failed_count
                    );
                    print_channels(&state);
                }
            }
        }
        Command::Remove { id } => {
            // Resolve against the current list so `video_id`-keyed entries work
            if let Err(e) = api::channels::refresh_channels(&state).await {
                tracing::warn!("Could not load channels before removal: {e}");
            }
            let id = state.registry.read().resolve_id(&id);
            api::channels::remove_channel(&state, &id).await?;
            println!("Removed channel {id}");
        }
        Command::Reindex => {
            api::channels::refresh_channels(&state).await?;
            let outcome = api::channels::reindex(&state).await?;
            println!(
                "Reindex {}: {} processed, {} indexed, {} failed",
                state.indexing.read().status(),
                outcome.videos_processed,
                outcome.successfully_indexed,
                outcome.failed
            );
        }
        Command::Search {
            query,
            method,
            aggregation,
            html,
            ..
        } => {
            if !state.search.read().can_submit(&query) {
                anyhow::bail!("Query is empty");
            }
            if let Some(preset) = method {
                state.search.write().select(preset);
            }
            tracing::info!("{} for {query:?}", state.search.read().preset().label());
            let view = match aggregation {
                Some(agg) => {
                    let strategy = state
                        .search
                        .read()
                        .preset()
                        .strategy(state.config.search_options())
                        .with_aggregation(agg);
                    api::search::run_search_with(&state, &query, strategy).await
                }
                None => api::search::run_search(&state, &query).await,
            };
            let Some(view) = view else {
                anyhow::bail!("Query is empty");
            };
            if let SearchView::Error(message) = &view {
                anyhow::bail!("{message}");
            }
            if html {
                print_html(&view);
            } else {
                print!("{view}");
            }
        }
        Command::Suggest { prefix } => {
            for phrase in api::search::suggest(&state, &prefix).await? {
                println!("{phrase}");
            }
        }
        Command::Click { phrase } => {
            api::search::record_click(&state, &phrase).await?;
            println!("Recorded \"{phrase}\"");
        }
    }

    Ok(())
}

fn print_channels(state: &ClientState) {
    let registry = state.registry.read();
    if registry.is_empty() {
        println!("No channels added yet");
        return;
    }
    for channel in registry.channels() {
        println!("{}  [{}]", channel.title, channel.id);
        println!(
            "    {} videos indexed, last updated: {}",
            channel.transcripts_count,
            channel.indexed_date()
        );
    }
}

fn print_html(view: &SearchView) {
    let SearchView::Results { entries, .. } = view else {
        print!("{view}");
        return;
    };
    for entry in entries {
        println!("<h3>{}</h3>", entry.title.as_html());
        println!("<p>{}</p>", entry.snippet.as_html());
        println!("<small>Relevance Score: {}%</small>", entry.relevance_percent);
    }
}
