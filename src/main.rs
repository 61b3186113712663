use clap::Parser;
use color_eyre::eyre::Result;
use profile_daemon::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use profile_daemon::records::DirRecordSource;
use profile_daemon::server::{serve, AppState, ShutdownSignal};
use profile_daemon::settings::{default_data_dir, load_settings, ModuleSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:47750";

/// Profile Daemon - user profile companion service for clinical data capture hosts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "PROFILE_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Data directory holding project records and settings (default: ~/.profile-daemon)
    #[arg(long, env = "PROFILE_DAEMON_DATA_DIR")]
    data_dir: Option<String>,

    /// Module settings file (default: <data-dir>/settings.toml)
    #[arg(long, env = "PROFILE_DAEMON_SETTINGS")]
    settings: Option<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "PROFILE_DAEMON_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "PROFILE_DAEMON_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: <data-dir>/logs)
    #[arg(long, env = "PROFILE_DAEMON_LOG_DIR")]
    log_dir: Option<String>,
}

fn report_bind_error(addr: std::net::SocketAddr, log_file: &std::path::Path, e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of profile-daemon may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Kill the existing process:   pkill profile-daemon");
        eprintln!("  2. Use a different port:        profile-daemon --addr 127.0.0.1:47751");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
        eprintln!();
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let data_dir = args
        .data_dir
        .map(PathBuf::from)
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from(".profile-daemon"));

    // Configure and initialize logging
    let log_dir = args
        .log_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("logs"));
    let log_file = log_dir.join(LOG_FILENAME);

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    // Load module settings; the file is optional.
    let settings_path = args
        .settings
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("settings.toml"));
    let settings = load_settings(&settings_path).unwrap_or_else(|e| {
        warn!("Failed to load module settings, using defaults: {e}");
        ModuleSettings::default()
    });

    match settings.project_id {
        Some(project) => info!("Profile project: {project}"),
        None => warn!("No profile project configured; project pages plan only the bootstrap"),
    }

    // Parse address
    let addr: std::net::SocketAddr = args.addr.parse()?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownSignal::None);
    let shutdown_tx = Arc::new(shutdown_tx);

    let store = Arc::new(DirRecordSource::new(data_dir));
    let state = Arc::new(AppState::new(settings, store, shutdown_tx));

    info!("Starting profile daemon on {addr}");

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            report_bind_error(addr, &log_file, &e);
            return Err(e.into());
        }
    };

    serve(listener, state, shutdown_rx).await?;

    info!("Profile daemon stopped");
    Ok(())
}
