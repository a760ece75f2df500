use anyhow::Context;
use clap::Parser;
use clinic_server::{bootstrap, create_app, ClinicServer, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clinic-server", about = "PetClinic Engine API server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "PETCLINIC_HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080, env = "PETCLINIC_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let secret = std::env::var("PETCLINIC_TOKEN_SECRET").unwrap_or_else(|_| {
        warn!("PETCLINIC_TOKEN_SECRET not set, using a development secret");
        "dev-secret-change-me".to_string()
    });

    let server = ClinicServer::new(ServerConfig::new(secret));
    bootstrap::seed(&server.identity)
        .await
        .context("seeding administrative accounts")?;

    let app = create_app(server);
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
