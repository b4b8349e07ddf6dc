use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagesnap::config::Config;
use pagesnap::AppState;

#[derive(Parser)]
#[command(
    name = "pagesnap",
    about = "PageSnap — headless-browser web page screenshot service",
    version
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "conf.json")]
    config: PathBuf,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagesnap=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Error: failed to load config '{}': {:?}",
                cli.config.display(),
                e
            );
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!("Screenshot directory: {}", config.folder);
    tracing::info!("Starting PageSnap on http://{}:{}", config.host, config.port);

    let folder = config.folder.clone();
    let addr = format!("{}:{}", config.host, config.port);

    let state = Arc::new(AppState::new(config));
    let app = pagesnap::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!(
        r#"
    PageSnap — headless page screenshot service
    ───────────────────────────────────────────────────────
    Endpoint:  http://{addr}/screenshot
    Images:    http://{addr}/{folder}

    Query parameters:
      url     page address (required)
      mode    render mode: pc or mobile (default: pc)
      width   emulated browser width, overrides mode (default: 1366)
      height  emulated browser height, overrides mode (default: 800)
      base64  1 to inline the PNG as a base64 data URI (default: 0)

    Response fields:
      state       true on success, false on failure
      msg         error text, only on failure
      url         requested page address
      mode        render mode used
      width       emulated browser width (not the image width)
      height      emulated browser height (not the image height)
      screenshot  public path of the saved image
      times       total capture time in milliseconds
      base64      image data URI, only when requested
    ───────────────────────────────────────────────────────
    "#
    );

    axum::serve(listener, app).await.unwrap();
}
