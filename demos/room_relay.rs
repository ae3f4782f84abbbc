//! Room relay example.
//!
//! Run with: `cargo run --example room_relay -- 127.0.0.1:8000`

use roomchat::relay::RoomRelay;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8000".to_string());

    let relay = RoomRelay::bind(addr.as_str()).await?;
    println!("Relay listening on ws://{}/ws/chat/<room>/", relay.local_addr()?);
    relay.serve().await;
    Ok(())
}
