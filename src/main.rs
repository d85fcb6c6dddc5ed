mod cli;

use crate::cli::{Cli, Commands, output::Output};
use anyhow::Context;
use metchat::{
    AppState, ForecastClient, MetOfficeClient, RelayConfig, api::routes::build_app,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let mut config = RelayConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    config.apply_env_overrides()?;

    init_tracing(&config, cli.verbose);

    match cli.command {
        None => serve(config, &output).await,
        Some(Commands::Config { validate }) => show_config(&config, validate, &output),
        Some(Commands::Weather { city }) => lookup_weather(&config, &city, &output).await,
    }
}

fn init_tracing(config: &RelayConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "metchat={level},metchat_server={level},tower_http={level}",
                level = config.server.log_level
            ))
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: RelayConfig, output: &Output) -> anyhow::Result<()> {
    output.banner();

    for warning in config.validate_with_warnings()? {
        tracing::warn!("{}", warning);
    }

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;
    tracing::info!(
        model = state.gateway.model_name(),
        history_limit = state.conversations.history_limit(),
        "Relay configured"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn show_config(config: &RelayConfig, validate: bool, output: &Output) -> anyhow::Result<()> {
    let set_or_unset = |name: &str| match config.resolve_env(name) {
        Some(_) => format!("{} (set)", name),
        None => format!("{} (unset)", name),
    };

    output.header("Server");
    output.kv("Address", &config.bind_address());
    output.kv("Log level", &config.server.log_level);
    let origins = if config.server.cors_origins.is_empty() {
        "any".to_string()
    } else {
        config.server.cors_origins.join(", ")
    };
    output.kv("CORS origins", &origins);

    output.header("Completion");
    output.kv("API base", &config.llm.api_base);
    output.kv("Model", &config.llm.model);
    output.kv("API key", &set_or_unset(&config.llm.api_key_env));

    output.header("Weather");
    output.kv("Forecast URL", &config.weather.forecast_url);
    output.kv("Geocode URL", &config.weather.geocode_url);
    output.kv("API key", &set_or_unset(&config.weather.api_key_env));

    output.header("Conversation");
    output.kv("History limit", &config.conversation.history_limit.to_string());
    output.kv("Max sessions", &config.conversation.max_sessions.to_string());
    println!();

    if validate {
        match config.validate_with_warnings() {
            Ok(warnings) => {
                for warning in &warnings {
                    output.warning(&warning.message);
                }
                output.success("Configuration is valid");
            }
            Err(e) => {
                output.error(&e.to_string());
                return Err(e.into());
            }
        }
    }

    Ok(())
}

async fn lookup_weather(config: &RelayConfig, city: &str, output: &Output) -> anyhow::Result<()> {
    let client = MetOfficeClient::from_config(&config.weather, config.weather_api_key())?;
    output.info(&format!("Looking up the forecast for {}", city));

    match client.current_weather(city).await {
        Ok(report) => {
            output.weather_report(&report);
            Ok(())
        }
        Err(e) => {
            output.error(e.message());
            Err(e.into())
        }
    }
}
