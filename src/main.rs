use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dataplane_sdk::api_docs::ApiDoc;
use dataplane_sdk::{api, config, server, Dataplane};

/// Standalone pass-through data plane.
/// Every signal is accepted and logged, which makes it a stand-in peer when
/// exercising a control plane.
#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dataplane_sdk=debug,dataplane=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let mut builder = Dataplane::builder()
        .retry_policy(config.retry_policy())
        .on_prepare(|flow| {
            tracing::info!(flow_id = %flow.id, transfer_type = %flow.transfer_type, "prepare");
            Ok(flow)
        })
        .on_start(|flow| {
            tracing::info!(flow_id = %flow.id, transfer_type = %flow.transfer_type, "start");
            Ok(flow)
        })
        .on_started(|flow| {
            tracing::info!(flow_id = %flow.id, "started");
            Ok(flow)
        })
        .on_completed(|flow| {
            tracing::info!(flow_id = %flow.id, "completed");
            Ok(flow)
        })
        .on_terminate(|flow| {
            tracing::info!(flow_id = %flow.id, "terminate");
            Ok(flow)
        });
    if let Some(id) = &config.dataplane_id {
        builder = builder.id(id.clone());
    }
    let dataplane = builder.build();

    let app = api::api_router(dataplane.clone())
        .merge(SwaggerUi::new("/v1/docs").url("/v1/openapi.json", ApiDoc::openapi()))
        .layer(server::cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    // Find available port
    let port = server::find_available_port(config.port).expect("Failed to find available port");

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(dataplane_id = %dataplane.id(), "Data plane listening on {}", addr);

    let running = server::start_server(app, addr)
        .await
        .expect("Failed to start server");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
    running.stop().await;
}
