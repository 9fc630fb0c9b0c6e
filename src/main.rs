use anyhow::Context;
use center_search::app::ports::{DirectionsProvider, Geocoder, LocationRepository};
use center_search::config::Config;
use center_search::infra::{build_client, NaverDirections, NaverGeocoder};
use center_search::server::{start_server, AppState};
use center_search::storage::{InMemoryLocationRepository, SqliteLocationRepository};
use center_search::{logging, metrics};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "center_search")]
#[command(about = "Registered center directory with map search and driving directions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Keep locations in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },
    /// Resolve one address to a coordinate
    Geocode {
        address: String,
    },
    /// Print a driving route summary. Points are "longitude,latitude".
    Route {
        #[arg(long)]
        start: String,
        #[arg(long)]
        goal: String,
        /// Pipe-separated intermediate points
        #[arg(long)]
        waypoints: Option<String>,
    },
}

struct MapClients {
    geocoder: Arc<NaverGeocoder>,
    directions: Arc<NaverDirections>,
}

fn map_clients(config: &Config) -> anyhow::Result<MapClients> {
    let credentials = config.maps.credentials();
    if !credentials.is_configured() {
        warn!("Map API credentials are not configured; geocoding and directions will fail");
    }
    let client = build_client(config.maps.timeout_seconds).context("building HTTP client")?;
    Ok(MapClients {
        geocoder: Arc::new(NaverGeocoder::new(
            client.clone(),
            &config.maps.geocode_url,
            credentials.clone(),
        )),
        directions: Arc::new(NaverDirections::new(
            client,
            &config.maps.directions_url,
            credentials,
        )),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before config so NCP_* overrides apply
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    // Map API clients are shared by every command
    let clients = map_clients(&config)?;

    match cli.command {
        Commands::Serve { port, memory } => {
            metrics::init_metrics();

            // Pick storage backend
            let repo: Arc<dyn LocationRepository> = if memory {
                info!("Using in-memory location store");
                Arc::new(InMemoryLocationRepository::new())
            } else {
                Arc::new(
                    SqliteLocationRepository::open(&config.database.path)
                        .with_context(|| format!("opening {}", config.database.path))?,
                )
            };
            let geocoder: Arc<dyn Geocoder> = clients.geocoder;
            let directions: Arc<dyn DirectionsProvider> = clients.directions;
            let state = AppState::new(repo, geocoder, directions, config.dedupe.policy());

            // CLI flag overrides config
            let port = port.unwrap_or(config.server.port);
            start_server(state, &config.server.host, port).await?;
        }
        Commands::Geocode { address } => {
            let coordinate = clients.geocoder.geocode(&address).await?;
            println!("📍 {address}");
            println!("   longitude: {}", coordinate.longitude);
            println!("   latitude:  {}", coordinate.latitude);
        }
        Commands::Route {
            start,
            goal,
            waypoints,
        } => {
            let response = clients
                .directions
                .route(&start, waypoints.as_deref(), &goal)
                .await?;
            match response.optimal() {
                Some(route) => {
                    println!("🚗 Route found");
                    println!("   Distance: {} m", route.summary.distance);
                    println!("   Duration: {} min", route.summary.duration / 60_000);
                    println!("   Toll:     {} KRW", route.summary.toll_fare);
                    println!("   Fuel:     {} KRW", route.summary.fuel_price);
                    println!("   Guides:   {}", route.guide.len());
                }
                None => {
                    println!(
                        "⚠️  No route found (code: {}, message: {})",
                        response.code,
                        response.message_or_empty()
                    );
                }
            }
        }
    }

    Ok(())
}
