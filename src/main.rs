use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressroom::{api, db, feed};

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Content and feed service for a small blog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the pressroom server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "9000")]
        port: u16,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "pressroom=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting pressroom server on port {}", port);

    let db = db::Database::open_default()?;
    db.migrate()?;

    let app = api::create_router(db, feed::FeedConfig::from_env());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("pressroom server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        // Default: start server
        None => serve(9000).await?,
    }

    Ok(())
}
