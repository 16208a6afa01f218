use gw_server::cli::{Cli, Command};
use gw_server::doctor::DoctorReport;
use gw_server::{AppState, ShutdownCoordinator, ShutdownKind, build_router, logger, relaunch, signals};

use std::error::Error;
use std::net::SocketAddr;

use clap::Parser;
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = gw_config::Config::load()?;
    config.validate()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Doctor { non_interactive } => {
            let report = DoctorReport::collect(&config)?;
            if non_interactive {
                println!("{}", report.to_json());
            } else {
                print!("{}", report.to_text());
            }
            Ok(())
        }
        Command::Serve => serve(config).await,
    }
}

async fn serve(config: gw_config::Config) -> Result<(), Box<dyn Error>> {
    let log_file_path = config.log_file_path()?;
    if let Some(parent) = log_file_path.as_ref().and_then(|p| p.parent()) {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting gw-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();
    // Installed before anything can schedule a restart
    signals::install(shutdown.clone())?;

    let app_state = AppState::from_config(&config, shutdown.clone())?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let mut outcome = shutdown.subscribe_guard();
    let mut drain = shutdown.subscribe_guard();

    info!("Server ready to accept connections");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let kind = drain.wait().await;
        info!("Draining connections before {kind:?}");
    })
    .await?;

    match outcome.poll_shutdown().unwrap_or(ShutdownKind::Stop) {
        ShutdownKind::Restart => {
            info!("Graceful shutdown complete, restarting");
            relaunch::relaunch()?;
        }
        ShutdownKind::Stop => info!("Graceful shutdown complete"),
    }

    Ok(())
}
