use payment_gateway::api;
use payment_gateway::config::AppConfig;
use payment_gateway::logging::init_tracing;
use payment_gateway::payments::providers::HttpAcquiringBank;
use payment_gateway::payments::store::InMemoryPaymentStore;
use payment_gateway::services::payment_service::PaymentService;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "🚀 Starting payment gateway"
    );
    info!(
        bind_addr = %config.server.bind_addr(),
        bank_base_url = %config.bank.base_url,
        bank_timeout_secs = config.bank.timeout_secs,
        "Configuration loaded"
    );

    let bank = HttpAcquiringBank::new(config.bank.to_provider_config())?;
    let store = InMemoryPaymentStore::new();
    let payment_service = PaymentService::new(Arc::new(bank), Arc::new(store));

    let app = api::router(payment_service);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "✅ Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
