use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use restcli::commands::{self, CommandStatus};
use restcli::config::{resolve_data_dir, DataDir, DATA_DIR_ENV};
use restcli::request::{Auth, BodySource, Method, RequestInput};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RESTCLI_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "restcli",
    version,
    about = "REST API testing from the command line",
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Directory holding environment, history and collections
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Fail on unreadable or corrupt data files instead of starting empty
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a GET request
    Get(RequestArgs),
    /// Send a POST request
    Post(RequestArgs),
    /// Send a PUT request
    Put(RequestArgs),
    /// Send a DELETE request
    Delete(RequestArgs),
    /// Send a PATCH request
    Patch(RequestArgs),
    /// Show request history, most recent first
    History {
        /// Only show the N most recent requests
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
    },
    /// Re-send a request from history (1 = most recent)
    Replay {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Manage environment variables used in {{VAR}} templates
    Env {
        #[command(subcommand)]
        command: EnvCommand,
    },
    /// Save and run named requests
    Collection {
        #[command(subcommand)]
        command: CollectionCommand,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Request timeout in seconds [default: config defaultTimeout or 30]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Show request and response details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Target URL, may contain {{VAR}} tokens
    url: String,

    /// Header as "Name: Value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Request body
    #[arg(short, long, conflicts_with = "data_file")]
    data: Option<String>,

    /// Read the request body from a file
    #[arg(short = 'f', long = "data-file", value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Bearer token for the Authorization header
    #[arg(long, conflicts_with_all = ["basic", "api_key"])]
    bearer: Option<String>,

    /// Basic auth credentials as user:password
    #[arg(long, value_name = "USER:PASSWORD", conflicts_with = "api_key")]
    basic: Option<String>,

    /// API key sent in the API key header
    #[arg(long)]
    api_key: Option<String>,

    /// Header name for --api-key [default: config apiKeyHeader or X-API-Key]
    #[arg(long, requires = "api_key")]
    api_key_header: Option<String>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum EnvCommand {
    /// Set a variable
    Set { key: String, value: String },
    /// Print a variable
    Get { key: String },
    /// List all variables
    List,
    /// Delete a variable
    Delete { key: String },
}

#[derive(Subcommand, Debug)]
enum CollectionCommand {
    /// Save the most recent history entry under a name
    Save { name: String },
    /// Run a saved request
    Load {
        name: String,
        #[command(flatten)]
        run: RunArgs,
    },
    /// List saved collections
    List,
    /// Delete a saved collection
    Delete { name: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{}", format!("✗ {err:#}").red());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<CommandStatus> {
    let root = resolve_data_dir(cli.data_dir.as_deref())?;
    let data = DataDir::open(&root, cli.strict).context("opening data directory")?;
    let timeout = |run: &RunArgs| run.timeout.unwrap_or(data.config.default_timeout);

    match cli.command {
        Commands::Get(args) => send(&data, Method::Get, args).await,
        Commands::Post(args) => send(&data, Method::Post, args).await,
        Commands::Put(args) => send(&data, Method::Put, args).await,
        Commands::Delete(args) => send(&data, Method::Delete, args).await,
        Commands::Patch(args) => send(&data, Method::Patch, args).await,
        Commands::History { limit } => commands::show_history(&data, limit.map(to_usize)),
        Commands::Replay { number, run } => {
            commands::replay(&data, to_usize(number), timeout(&run), run.verbose).await
        }
        Commands::Env { command } => match command {
            EnvCommand::Set { key, value } => commands::env::set_var(&data, &key, &value),
            EnvCommand::Get { key } => commands::env::get_var(&data, &key),
            EnvCommand::List => commands::env::list_vars(&data),
            EnvCommand::Delete { key } => commands::env::delete_var(&data, &key),
        },
        Commands::Collection { command } => match command {
            CollectionCommand::Save { name } => commands::collection::save(&data, &name),
            CollectionCommand::Load { name, run } => {
                commands::collection::load(&data, &name, timeout(&run), run.verbose).await
            }
            CollectionCommand::List => commands::collection::list(&data),
            CollectionCommand::Delete { name } => commands::collection::delete(&data, &name),
        },
    }
}

async fn send(data: &DataDir, method: Method, args: RequestArgs) -> Result<CommandStatus> {
    let verbose = args.run.verbose;
    let input = build_input(data, method, args)?;
    commands::send_request(data, &input, verbose).await
}

fn build_input(data: &DataDir, method: Method, args: RequestArgs) -> Result<RequestInput> {
    let mut input = RequestInput::new(method, args.url);
    input.headers = args.headers;
    input.timeout_secs = args.run.timeout.unwrap_or(data.config.default_timeout);
    input.body = match (args.data, args.data_file) {
        (Some(text), _) => Some(BodySource::Inline(text)),
        (None, Some(path)) => Some(BodySource::File(resolve_path(&path)?)),
        (None, None) => None,
    };
    input.auth = match (args.bearer, args.basic, args.api_key) {
        (Some(token), _, _) => Some(Auth::Bearer(token)),
        (None, Some(credentials), _) => Some(Auth::Basic(credentials)),
        (None, None, Some(key)) => Some(Auth::ApiKey {
            header: args
                .api_key_header
                .unwrap_or_else(|| data.config.api_key_header.clone()),
            key,
        }),
        (None, None, None) => None,
    };
    Ok(input)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
