//! JSON HTTP service for the deckodds probability engine.
//!
//! # Routes
//!
//! | Method | Path                 | Description                                   |
//! |--------|----------------------|-----------------------------------------------|
//! | `GET`  | `/api/health`        | Liveness check                                |
//! | `POST` | `/api/calculate`     | Chance of drawing at least N matching cards   |
//! | `POST` | `/api/detect`        | Hand categories present in a set of cards     |
//! | `POST` | `/api/hand-odds`     | Category odds after discarding and redrawing  |
//! | `POST` | `/api/discard-table` | Per card type draw odds for each discard size |
//!
//! Set `PORT` to change the listening port (default: `8080`) and `RUST_LOG`
//! to adjust logging (default: `info`).

mod routes;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialise tracing (respects RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("deckodds server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::router()).await
}
