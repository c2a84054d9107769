use doclens_service::create_app;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let app = match create_app() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    let addr = listener.local_addr()?;

    info!("Document Analysis Service starting on {}", addr);
    info!("Health check endpoint: http://{}/health", addr);
    info!("Label analysis endpoint: POST http://{}/analyze/label", addr);
    info!("Prescription endpoint: POST http://{}/analyze/prescription", addr);
    info!("Report summary endpoint: POST http://{}/analyze/report", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
