//! Todo Lists server entry point

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use todo_lists_lib::config::AppConfig;
use todo_lists_lib::http::{router, AppState};
use todo_lists_lib::repository::init_db;

const DEFAULT_LOG_FILTER: &str = "todo_lists=debug,todo_lists_lib=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rolling_logger::init_logger_with(
        &config.log_dir,
        "TodoLists",
        rolling_logger::RollingConfig::default(),
        DEFAULT_LOG_FILTER,
    ) {
        eprintln!("Failed to init rolling logger: {}", e);
        std::process::exit(1);
    }

    info!(database = %config.database_path.display(), "Starting Todo Lists server");

    let db = match init_db(&config.database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to open database");
            std::process::exit(1);
        }
    };

    let app = router(AppState::from_db(&db));

    let address = config.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "Failed to bind to {}", address);
            std::process::exit(1);
        }
    };
    info!("Listening on http://{}", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }

    db.close().await;
    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
