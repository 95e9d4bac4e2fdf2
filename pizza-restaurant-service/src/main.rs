use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pizza_restaurant_service::{app, seed, store::Store};

#[derive(Parser)]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "app.db", global = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5555)]
        port: u16,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Replace all rows with the sample data set
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("pizza_restaurant_service=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => {
            let store = Store::open(cli.database_url)?;
            let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
            info!("listening on {}", listener.local_addr()?);

            axum::serve(listener, app(store))
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("shut down");
        }
        Commands::Migrate => {
            let applied = Store::new(cli.database_url).run_migrations()?;
            info!(applied, "Migrations complete");
        }
        Commands::Seed => {
            let store = Store::open(cli.database_url)?;
            store.interact(seed::run).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
