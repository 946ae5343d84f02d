//! Serve command - starts the webhook receiver.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use metrics_exporter_prometheus::PrometheusBuilder;

use hw_api::{ApiServer, ApiServerConfig, AppState, DeliveryLog, WebhookSecret};

use crate::config::AppConfig;

/// Runs the webhook receiver.
pub async fn run_server(config: AppConfig) -> Result<()> {
    println!("{} Starting Hook Warden...", "[server]".cyan());

    let bind_address: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    // Install the Prometheus recorder before the first delivery is counted
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    hw_observability::register_metrics();

    if !config.webhook.verify {
        println!(
            "  {} {}",
            "!".yellow(),
            "Signature verification is disabled; deliveries are accepted unsigned".yellow()
        );
    } else if config.webhook.secret.is_empty() {
        println!(
            "  {} {}",
            "!".yellow(),
            "No webhook secret configured; verification will use an empty key".yellow()
        );
    }

    let state = AppState::new(WebhookSecret::from(config.webhook.secret.clone()))
        .with_verification(config.webhook.verify)
        .with_delivery_log(DeliveryLog {
            print_body: config.webhook.print_body,
            print_headers: config.webhook.print_headers,
        })
        .with_prometheus_handle(prometheus_handle);

    let static_dir = config
        .server
        .static_dir
        .as_ref()
        .map(PathBuf::from)
        .filter(|dir| dir.is_dir());

    let server_config = ApiServerConfig {
        bind_address,
        enable_swagger: config.server.enable_swagger,
        static_dir: static_dir.clone(),
        shutdown_timeout: Duration::from_secs(30),
    };

    println!();
    println!("{}", "Hook Warden".bold());
    println!("{}", "═".repeat(40));
    println!("  {} http://{}", "Address:".cyan(), bind_address);
    println!(
        "  {} {}",
        "Verification:".cyan(),
        if config.webhook.verify {
            "enabled"
        } else {
            "disabled"
        }
    );

    if config.server.enable_swagger {
        println!(
            "  {} http://{}/swagger-ui",
            "Swagger UI:".cyan(),
            bind_address
        );
    }

    println!();
    println!("{}", "Endpoints:".bold());
    println!("  GET  /health              - Health check");
    println!("  GET  /ready               - Readiness probe");
    println!("  GET  /live                - Liveness probe");
    println!("  POST /hooks/github        - Webhook delivery ingestion");
    println!("  GET  /metrics             - Prometheus metrics");
    if static_dir.is_some() {
        println!("  GET  /static/*            - Static files");
    }
    println!();
    println!("Press {} to stop", "Ctrl+C".yellow());
    println!();

    let server = ApiServer::new(state, server_config);
    server.run().await.context("Server error")?;

    println!();
    println!("{} Server stopped", "[server]".cyan());

    Ok(())
}
