use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use library_engine::catalog::{load_catalog, load_playlist_seeds, populate_store};
use library_engine::{EngineConfig, LibraryEngine, Song};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "library-engine")]
#[command(about = "Search, rate and compare a music library", long_about = None)]
struct Args {
    /// Path to the song catalog (JSON array of songs)
    #[arg(
        short = 'c',
        long,
        default_value = "~/.local/share/library-engine/catalog.json"
    )]
    catalog: String,

    /// Engine config file (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ranked search over titles, artists, albums and keywords
    Search {
        term: String,
    },

    /// Songs rated at least MIN, highest first
    TopRated {
        min: f64,
    },

    /// Play songs by title, then show the recently-played list
    Recent {
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Catalog and index statistics
    Stats,

    /// Suggest playlists to merge
    Merges {
        /// Playlist seed file (JSON)
        playlists: String,

        /// Minimum overlap percentage (default: from config, 80)
        #[arg(long)]
        threshold: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(&expand(path))?,
        None => EngineConfig::default(),
    };

    let catalog = load_catalog(&expand(&args.catalog))?;
    let mut engine = LibraryEngine::new(config, catalog);

    match args.command {
        Command::Search { term } => {
            let hits = engine.index().search_scored(&term);
            if hits.is_empty() {
                println!("No songs match '{}'", term);
            }
            for hit in hits {
                println!("{:>4}  {}", hit.score, describe(hit.song));
            }
        }
        Command::TopRated { min } => {
            for song in engine.songs_rated_at_least(min) {
                println!("{:>4.1}  {}", song.rating, describe(&song));
            }
        }
        Command::Recent { titles } => {
            for title in &titles {
                match engine.index().song_by_title(title).cloned() {
                    Some(song) => engine.play(song),
                    None => log::warn!("No song titled '{}' in the catalog", title),
                }
            }
            for (position, song) in engine.history().songs().iter().enumerate() {
                println!("{:>2}. {}", position + 1, describe(song));
            }
        }
        Command::Stats => {
            let stats = engine.index().stats();
            println!("Songs:    {}", stats.total_songs);
            println!("Titles:   {}", stats.unique_titles);
            println!("Artists:  {}", stats.unique_artists);
            println!("Albums:   {}", stats.unique_albums);
            println!("Keywords: {}", stats.unique_keywords);
            println!("Rating tree height: {}", engine.ratings().height());
        }
        Command::Merges {
            playlists,
            threshold,
        } => {
            if let Some(t) = threshold {
                if !(0.0..=100.0).contains(&t) {
                    bail!("Threshold must be between 0 and 100, got {}", t);
                }
            }

            let seeds = load_playlist_seeds(&expand(&playlists))?;
            populate_store(engine.playlists_mut(), &seeds)?;

            let suggestions = match threshold {
                Some(t) => engine.merge_suggestions_at(t),
                None => engine.merge_suggestions(),
            };
            log::info!("{} merge suggestion(s)", suggestions.len());

            let store = engine.playlists();
            let name = |id| store.playlist(id).map(|p| p.name()).unwrap_or("?");
            for s in &suggestions {
                println!(
                    "{} + {}: {:.2}% overlap, jaccard {:.2}, {} shared of {}",
                    name(s.first),
                    name(s.second),
                    s.overlap_percent,
                    s.jaccard,
                    s.shared_songs,
                    s.total_unique_songs
                );
            }

            let stats = engine.similarity().statistics();
            println!(
                "{} playlists, {} comparisons: {} high, {} medium, {} low",
                stats.total_playlists, stats.total_comparisons, stats.high, stats.medium, stats.low
            );
        }
    }

    Ok(())
}

/// Expand ~ in a user-supplied path
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn describe(song: &Song) -> String {
    match &song.album {
        Some(album) => format!("{} - {} [{}] ({})", song.artist, song.title, album, song.duration),
        None => format!("{} - {} ({})", song.artist, song.title, song.duration),
    }
}
