mod commands;
mod output;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use commands::config_cmd::ConfigCmd;
use guestlog::{GitHubClient, GuestlogConfig, MessageAppender, serve};

#[derive(Parser)]
#[command(
    name = "guestlog",
    version,
    about = "Append guestbook messages to a JSON file in a GitHub repository"
)]
struct Cli {
    /// Repository owner
    #[arg(long, env = "GITHUB_OWNER", global = true)]
    owner: Option<String>,

    /// Repository name
    #[arg(long, env = "GITHUB_REPO", global = true)]
    repo: Option<String>,

    /// Access token for the contents API
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Path of the message log inside the repository
    #[arg(long, env = "FILE_PATH", global = true)]
    file_path: Option<String>,

    /// Base URL of the GitHub API
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    api_url: Option<String>,

    /// Output format: table, json, yaml
    #[arg(short, long, env = "GUESTLOG_OUTPUT", global = true, default_value = "table")]
    output: String,

    /// Log format: pretty or json
    #[arg(long, env = "GUESTLOG_LOG_FORMAT", global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one function event and print the response
    Invoke {
        /// Event document ({"httpMethod": ..., "body": ...})
        #[arg(default_value = commands::invoke::DEFAULT_EVENT_PATH)]
        event: PathBuf,
    },
    /// Serve the handler over HTTP
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8888")]
        bind: SocketAddr,
        #[arg(long, default_value = serve::DEFAULT_ROUTE)]
        route: String,
    },
    /// Append a message
    Post { username: String, message: String },
    /// Show the stored messages
    List,
    /// Manage local configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
    /// Show version
    Version,
}

impl Cli {
    fn overrides(&self) -> GuestlogConfig {
        GuestlogConfig {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            token: self.token.clone(),
            file_path: self.file_path.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

/// Logs go to stderr; stdout carries the response document.
fn init_logging(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match format {
        "json" => builder.json().with_target(true).init(),
        _ => builder.pretty().with_target(true).init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_format);

    let config = GuestlogConfig::load().merge(cli.overrides());
    let store = Arc::new(GitHubClient::new());
    let appender = MessageAppender::new(config.clone(), store.clone());

    let result = match cli.command {
        Commands::Invoke { event } => commands::invoke::run(&event, &appender).await,
        Commands::Serve { bind, route } => serve::serve(appender, bind, &route).await,
        Commands::Post { username, message } => {
            commands::post::run(&username, &message, &appender, &cli.output).await
        }
        Commands::List => commands::list::run(&config, store.as_ref(), &cli.output).await,
        Commands::Config { cmd } => commands::config_cmd::run(cmd, &config, &cli.output),
        Commands::Version => {
            println!("guestlog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
