use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use liedetect_client::{
    create_router, ApiClient, AppState, Config, MediaRef, ParticipantRole, SessionOrchestrator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "liedetect-client", version, about = "Upload a recorded session and fetch its lie-detection summary")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, default_value = "config/liedetect-client")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a video, run both analyses and print the merged summary
    Submit {
        /// Recorded video (mp4)
        video: PathBuf,

        /// questioner or answerer (defaults to the configured role)
        #[arg(long)]
        role: Option<ParticipantRole>,
    },
    /// Check that the analysis service is reachable
    Health,
    /// Print the service's stored record for a session
    Session { session_id: String },
    /// Run the local status API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Analysis service: {}", cfg.api.base_url);

    let client = ApiClient::new(&cfg.api)?;

    match cli.command {
        Command::Submit { video, role } => {
            let media = MediaRef::open(&video)?;
            let role = role.unwrap_or(cfg.session.default_role);
            let orchestrator = SessionOrchestrator::new(Arc::new(client));

            let result = orchestrator.submit(&media, role).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Health => {
            client
                .health()
                .await
                .with_context(|| format!("{} is not healthy", client.base_url()))?;
            println!("OK");
        }
        Command::Session { session_id } => {
            let record = client.session(&session_id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Serve => {
            let orchestrator = Arc::new(SessionOrchestrator::new(Arc::new(client)));
            let state = AppState::new(orchestrator, cfg.session.default_role);

            let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            info!("Status API listening on {}", addr);

            axum::serve(listener, create_router(state))
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    info!("Shutting down");
                })
                .await
                .context("Status API failed")?;
        }
    }

    Ok(())
}
