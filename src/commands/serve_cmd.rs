use std::net::SocketAddr;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::services::app_config::AppConfig;
use crate::services::lead_forward::sink_from_address;
use crate::services::lead_relay::lead_routes;

pub async fn serve_command(cmd: Commands, config: &AppConfig) {
    if let Commands::Serve { listen } = cmd {
        let listen = listen.unwrap_or_else(|| config.listen.clone());
        let addr: SocketAddr = match listen.parse() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Invalid listen address '{listen}': {e}");
                return;
            }
        };

        let sink = sink_from_address(config.lead_webhook_url.as_deref());
        if sink.is_none() {
            info!("no lead webhook configured, leads are acknowledged but not relayed");
        }

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        match warp::serve(lead_routes(sink)).try_bind_with_graceful_shutdown(addr, shutdown) {
            Ok((bound, server)) => {
                println!("Lead relay listening on http://{bound}/api/lead");
                server.await;
                info!("lead relay stopped");
            }
            Err(e) => eprintln!("Failed to start lead relay: {e}"),
        }
    }
}
