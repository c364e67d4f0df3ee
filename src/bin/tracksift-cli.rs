use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracksift::link::resolve_id;
use tracksift::models::GameTrack;
use tracksift::{Collector, FetchConfig, LinkKind, MemoryCache};

#[derive(Parser)]
#[command(name = "tracksift-cli")]
#[command(about = "CLI for Tracksift - artist catalog collector", long_about = None)]
struct Cli {
    /// Bearer token for the catalog API (can also be set via CATALOG_TOKEN env var)
    #[arg(long, env = "CATALOG_TOKEN")]
    token: String,

    /// Market code used for availability, e.g. US
    #[arg(short, long, env = "CATALOG_MARKET")]
    market: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "CATALOG_API_BASE")]
    api_base: Option<String>,

    /// Releases fetched concurrently during discovery
    #[arg(short, long, default_value_t = 5)]
    window: usize,

    /// Attempts per request before giving up on rate limiting
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List an artist's primary tracks as JSON, most popular first
    Tracks {
        /// Artist URI, URL or ID
        artist: String,
    },
    /// List an artist's albums with duplicate editions collapsed
    Albums {
        /// Artist URI, URL or ID
        artist: String,

        /// Prefer the edition with the most explicit tracks
        #[arg(long)]
        prefer_explicit: bool,
    },
    /// List the playable tracks of an album as JSON
    AlbumTracks {
        /// Album URI, URL or ID
        album: String,
    },
    /// List the playable tracks of a playlist as JSON
    PlaylistTracks {
        /// Playlist URI, URL or ID
        playlist: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = FetchConfig::default()
        .with_release_window(cli.window)
        .with_max_retries(cli.max_retries);
    if let Some(market) = &cli.market {
        config = config.with_market(market.as_str());
    }
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base.as_str());
    }

    let collector = Collector::new(config)?.with_cache(Arc::new(MemoryCache::default()));

    match &cli.command {
        Commands::Tracks { artist } => {
            let id = resolve_id(artist, LinkKind::Artist)?;
            let mut tracks = collector.collect_game_tracks(&id, &cli.token).await?;
            GameTrack::rank_by_popularity(&mut tracks);

            eprintln!("✅ {} tracks", tracks.len());
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        Commands::Albums {
            artist,
            prefer_explicit,
        } => {
            let id = resolve_id(artist, LinkKind::Artist)?;
            let albums = collector
                .artist_albums(&id, &cli.token, *prefer_explicit)
                .await?;

            eprintln!("✅ {} albums", albums.len());
            println!("{}", serde_json::to_string_pretty(&albums)?);
        }
        Commands::AlbumTracks { album } => {
            let id = resolve_id(album, LinkKind::Album)?;
            let tracks = collector.collect_album_tracks(&id, &cli.token).await?;

            eprintln!("✅ {} tracks", tracks.len());
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        Commands::PlaylistTracks { playlist } => {
            let id = resolve_id(playlist, LinkKind::Playlist)?;
            let tracks = collector.collect_playlist_tracks(&id, &cli.token).await?;

            eprintln!("✅ {} tracks", tracks.len());
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
    }

    Ok(())
}
