//! ETA Countdown - A countdown controller served over HTTP
//!
//! This is the main entry point for the eta-countdown application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use eta_countdown::{
    api::create_router,
    config::Config,
    display::DisplayBoard,
    services::check_shell_available,
    state::AppState,
    tasks::{finish_action_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("eta_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting eta-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, max_time={}min, displays={:?}",
          config.host, config.port, config.max_time, config.displays);

    // A finish command needs a shell to run in
    if config.on_finish.is_some() {
        if let Err(e) = check_shell_available().await {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }

    // Register the initial displays
    let displays = Arc::new(DisplayBoard::new().with_log_mirror(config.log_ticks));
    for name in &config.displays {
        displays.add(name);
    }

    // Create application state and the countdown ticker task
    let (state, ticker) = AppState::new(
        config.port,
        config.host.clone(),
        config.max_time,
        displays,
        TICK_PERIOD,
    );
    let state = Arc::new(state);
    tokio::spawn(ticker.run());

    // Start the finish action background task
    let finish_state = Arc::clone(&state);
    let finish_action = config.finish_action();
    tokio::spawn(async move {
        finish_action_task(finish_state, finish_action).await;
    });

    if config.autostart {
        let snapshot = state.reset_countdown(None).await?;
        info!("Countdown armed at startup: {:?}", snapshot.remaining);
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /countdown/reset[?minutes=M] - Arm the countdown");
    info!("  POST   /countdown/start             - Resume the countdown");
    info!("  POST   /countdown/stop              - Pause the countdown");
    info!("  GET    /displays                    - List displays");
    info!("  PUT    /displays/:name              - Register a display");
    info!("  DELETE /displays/:name              - Remove a display");
    info!("  GET    /status                      - Check countdown status");
    info!("  GET    /health                      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
