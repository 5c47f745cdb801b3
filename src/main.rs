use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine::catalog::Catalog;
use vitrine::config::ServerConfig;
use vitrine::layout::{Viewport, render_store};
use vitrine::server::{AppState, create_router};
use vitrine::store::{Backend, Latency, SqliteBackend};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "A store-front administration server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// TOML configuration file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Multiplier for simulated repository latency (0 disables it)
        #[arg(long)]
        latency_scale: Option<f64>,
    },

    /// Print the render plan of a store as JSON
    Preview {
        /// Store to render
        #[arg(long)]
        store: String,

        /// Device class: mobile, tablet or desktop
        #[arg(long, default_value = "desktop")]
        viewport: Viewport,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Restore every collection to the default dataset
    Reset {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

fn open_catalog(config: &ServerConfig) -> anyhow::Result<Catalog> {
    fs::create_dir_all(&config.data_dir)?;

    let backend = SqliteBackend::new(config.db_path())?;
    backend.initialize()?;

    Ok(Catalog::new(
        Arc::new(backend),
        Latency::scaled(config.latency_scale),
    ))
}

fn offline_config(data_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        data_dir,
        latency_scale: 0.0,
        ..ServerConfig::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vitrine=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Reset { data_dir } => {
                let catalog = open_catalog(&offline_config(data_dir))?;
                catalog.reset_to_defaults().await?;
                println!("Catalog reset to defaults");
            }
        },
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
            latency_scale,
        } => {
            let mut config = match config {
                Some(path) => ServerConfig::from_file(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if let Some(scale) = latency_scale {
                config.latency_scale = scale;
            }
            config.validate()?;

            let state = Arc::new(AppState {
                catalog: open_catalog(&config)?,
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Preview {
            store,
            viewport,
            data_dir,
        } => {
            let catalog = open_catalog(&offline_config(data_dir))?;
            if catalog.stores.get_by_id(&store).await.is_none() {
                bail!("Store {store} not found");
            }

            let plan = render_store(&catalog, &store, viewport).await;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}
