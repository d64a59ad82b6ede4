use forecast_server::{init_tracing, serve, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ServerConfig::from_env()?;
    serve(config).await
}
