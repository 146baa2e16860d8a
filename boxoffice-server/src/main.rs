use boxoffice_server::{AppState, BrokerRouter, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let port = config.port;
    let model = config.model.clone();

    let state = AppState::from_config(config)?;
    let app = BrokerRouter::new(state).build();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    println!("✓ boxoffice broker listening on http://0.0.0.0:{}", port);
    println!("✓ completion model: {}", model);
    println!("✓ POST / with a JSON chat body to talk to the broker");

    axum::serve(listener, app).await?;
    Ok(())
}
