mod config;
mod http_server;
mod logging;
mod migration;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;
mod youtube_rs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use tokio::sync::watch;

use crate::{
    config::Config,
    http_server::state::{AppState, OAuthState},
    logging::{LogFormat, init_tracing},
    migration::{
        MigrationPipeline,
        types::{MigrationRequest, PipelineState, PlaylistDescriptor},
    },
    ports::youtube::YoutubeClient,
    services::youtube::client::YoutubeHttpAdapter,
    youtube_rs::auth::AccessToken,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_PORTER_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directives, e.g. `info` or `playlist_porter=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// Console log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Export traces to this OTLP/gRPC endpoint
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web UI and JSON API
    Serve {
        /// The port to run the server on
        #[arg(short, long, env = "PLAYLIST_PORTER_HTTP_PORT")]
        port: Option<u16>,

        /// Base URL for the service (used for the OAuth redirect)
        #[arg(long, env = "BASE_URL")]
        base_url: Option<String>,

        /// Directory holding the static web UI
        #[arg(long, env = "PLAYLIST_PORTER_STATIC_DIR")]
        static_dir: Option<String>,

        /// Google OAuth client id
        #[arg(long, env = "GOOGLE_CLIENT_ID")]
        google_client_id: Option<String>,

        /// Google OAuth client secret
        #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
        google_client_secret: Option<String>,
    },
    /// Copy a playlist into a new private playlist
    Convert {
        /// OAuth access token with the youtube scope
        #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,

        /// Id of the playlist to copy from
        #[arg(short, long)]
        source_playlist: String,

        /// Name of the new playlist
        #[arg(short, long)]
        name: String,

        /// Description of the new playlist
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List the playlists owned by the token's account
    Playlists {
        /// OAuth access token with the youtube scope
        #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let tracer_provider = init_tracing(
        &args.log_level,
        args.log_format,
        args.otlp_endpoint.as_deref(),
    )?;

    let result = run(args).await;

    if let Some(provider) = tracer_provider
        && let Err(error) = provider.shutdown()
    {
        eprintln!("Failed to flush traces: {error}");
    }

    result
}

async fn run(args: Args) -> Result<()> {
    tracing::debug!("Loading configuration");
    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load playlist-porter config")?;

    match args.command {
        Commands::Serve {
            port,
            base_url,
            static_dir,
            google_client_id,
            google_client_secret,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
            if google_client_id.is_some() {
                config.google_oauth.client_id = google_client_id;
            }
            if google_client_secret.is_some() {
                config.google_oauth.client_secret = google_client_secret;
            }

            let app_state = build_app_state(&config)?;
            tracing::info!("Starting HTTP server on port: {}", config.port);
            http_server::app::start(config.port, app_state).await?;
        }
        Commands::Convert {
            access_token,
            source_playlist,
            name,
            description,
        } => {
            let adapter = youtube_adapter(&config)?;
            let pipeline = MigrationPipeline::new(adapter);
            let request = MigrationRequest {
                access_token: access_token_arg(access_token)?,
                source_playlist_id: source_playlist,
                descriptor: PlaylistDescriptor::new(name, description),
            };

            let (progress, mut observer) = watch::channel(PipelineState::Idle);
            let progress_logger = tokio::spawn(async move {
                while observer.changed().await.is_ok() {
                    let state = observer.borrow_and_update().clone();
                    match &state {
                        PipelineState::Populating { playlist, total } => {
                            tracing::info!(playlist_id = %playlist.id, total, "Adding videos")
                        }
                        state => tracing::debug!(?state, "Pipeline state changed"),
                    }
                    if state.is_terminal() {
                        break;
                    }
                }
            });

            let outcome = pipeline.run_with_progress(&request, &progress).await;
            drop(progress);
            if let Err(error) = progress_logger.await {
                tracing::warn!(error = %error, "Progress logger task failed");
            }

            let summary = outcome?;
            println!("{}", summary.message);
            if let Some(warning) = &summary.warning {
                println!("{warning}");
            }
            for failure in &summary.failed {
                println!("  {}: {}", failure.item_reference, failure.error_reason);
            }
            println!("{}", summary.playlist.url);
        }
        Commands::Playlists { access_token } => {
            let adapter = youtube_adapter(&config)?;
            let playlists = adapter
                .my_playlists(&access_token_arg(access_token)?)
                .await
                .wrap_err("Failed to fetch playlists")?;

            if playlists.is_empty() {
                println!("No playlists found");
            }
            for playlist in playlists {
                println!(
                    "{}\t{}\t{} video(s)",
                    playlist.id, playlist.title, playlist.item_count
                );
            }
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                tracing::info!("Default config available at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}

fn access_token_arg(raw: String) -> Result<AccessToken> {
    let token = AccessToken::new(raw);
    if token.is_blank() {
        bail!("Access token must not be blank");
    }
    Ok(token)
}

fn youtube_adapter(config: &Config) -> Result<YoutubeHttpAdapter> {
    YoutubeHttpAdapter::new(&config.youtube, config.request_timeout()?)
}

fn build_app_state(config: &Config) -> Result<AppState> {
    let request_timeout = config.request_timeout()?;
    let youtube: Arc<dyn YoutubeClient> = Arc::new(youtube_adapter(config)?);

    let oauth = match config.oauth_credentials() {
        Some(credentials) => Some(OAuthState {
            credentials,
            auth_url: config.google_oauth.auth_url()?,
            token_url: config.google_oauth.token_url()?,
        }),
        None => {
            tracing::warn!("Google OAuth client id/secret not configured, /login is disabled");
            None
        }
    };

    let mut app_state = AppState::for_client(youtube)
        .with_oauth(oauth)
        .with_static_dir(config.static_dir_path());
    app_state.http_client = reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .wrap_err("Failed to build http client")?;

    Ok(app_state)
}
