use crate::config::ServerConfig;
use crate::server::{ServerState, SharedState};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info};

mod client;
mod config;
mod connection;
mod frame;
mod handler;
mod matchmaking;
mod server;
mod session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state: SharedState = Arc::new(Mutex::new(ServerState::default()));
    info!("created server state with {:?}", config);

    let http_addr = config.http_addr;
    let routes = handler::routes(state.clone());
    tokio::spawn(async move {
        warp::serve(routes).run(http_addr).await;
    });

    let listener = TcpListener::bind(config.game_addr).await?;
    info!("listening for players on {}", config.game_addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(connection::client_connection(stream, peer, state.clone()));
            }
            Err(e) => error!("error accepting connection: {}", e),
        }
    }
}
