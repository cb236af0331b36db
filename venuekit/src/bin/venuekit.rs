use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use venuekit::events::LoggingEventSink;
use venuekit::observability::{init_logging, LoggingConfig};
use venuekit::utils::{format_iso8601, try_parse_iso_string};
use venuekit::venues::{
    DeleteAction, DeleteState, Element, NavigationPolicy, Navigator, ReqwestTransport,
    StaticPage, VenueClientConfig,
};

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Venue listings client tools")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Parse a timestamp and print it in UTC.
    Parse {
        /// e.g. 2021-03-15T10:30:00.500Z
        timestamp: String,
    },

    /// Delete a venue, as the delete button on its page does.
    Delete {
        /// The venue id, sent verbatim.
        venue_id: String,

        /// Origin of the venues app. Overrides the config file and environment.
        #[arg(long)]
        base_url: Option<String>,

        /// JSON config file. Defaults to VENUEKIT_* environment variables.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only leave the page when the server reports success.
        #[arg(long)]
        only_on_success: bool,
    },
}

/// Prints the location the page would be replaced with.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn replace(&self, location: &str) {
        println!("location.replace({location})");
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<VenueClientConfig, anyhow::Error> {
    match path {
        Some(path) => VenueClientConfig::from_json_file(path)
            .with_context(|| format!("Invalid config file {}", path.display())),
        None => VenueClientConfig::from_env().context("Invalid VENUEKIT_* environment"),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, anyhow::Error> {
    let args = Args::parse();
    init_logging(&LoggingConfig::new().with_json(args.json_logs))
        .context("Could not initialize logging")?;

    match args.command {
        Command::Parse { timestamp } => match try_parse_iso_string(&timestamp) {
            Ok(ts) => {
                println!("{}", format_iso8601(&ts));
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                tracing::warn!(input = %timestamp, "{err}");
                println!("Invalid Date");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Delete {
            venue_id,
            base_url,
            config,
            only_on_success,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url);
            }
            if only_on_success {
                config = config.with_navigation(NavigationPolicy::OnSuccess);
            }

            let page = StaticPage::new()
                .with_element(Element::new(&config.control_id).with_data(&config.id_attribute, venue_id));
            let transport = ReqwestTransport::new(&config).context("Could not build HTTP client")?;
            let action = DeleteAction::bind(
                Arc::new(page),
                Arc::new(transport),
                Arc::new(PrintNavigator),
                config,
            )?
            .with_event_sink(Arc::new(LoggingEventSink::debug()));

            // Failures are already logged by the action.
            let state = DeleteState::from_result(&action.click().await);
            tracing::debug!(?state, "Delete finished");
            match state {
                DeleteState::Failed => Ok(ExitCode::FAILURE),
                _ => Ok(ExitCode::SUCCESS),
            }
        }
    }
}
