use crate::components::google::collaborators_from_config;
use crate::config::Config;
use crate::error::Error;
use crate::handler::SubmissionHandler;
use crate::shutdown;
use crate::web::{app, AppState};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the handler and serve until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    let collaborators = collaborators_from_config(&config).map_err(|e| {
        error!("Failed to initialize Google clients: {:?}", e);
        e
    })?;
    let handler = SubmissionHandler::new(collaborators, config.timezone);
    let app = app(AppState { handler });

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(Error::from)?;
    info!(
        "Listening on {} (sheet {}, calendar {}, time zone {})",
        address,
        config.google_sheet_id,
        config.google_calendar_id,
        config.timezone.name()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server shut down");
    Ok(())
}
