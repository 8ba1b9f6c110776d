use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use webui_config::{utils, ConfigBackend, ConfigLoader, SharedConfig};

/// Inspect the WebUI configuration
///
/// Loads the built-in defaults and the user configuration file, then
/// queries or edits the resulting tree in memory.
#[derive(Parser, Debug)]
#[command(name = "webui-config")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, or JSON with a .json extension)
    ///
    /// If not specified, searches:
    /// 1. ./.webui.toml and ./.webui.json
    /// 2. $WEBUI_CONFIG
    /// 3. ~/.config/webui/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from an empty tree instead of the built-in defaults
    #[arg(long)]
    no_defaults: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value at a dot path as JSON
    Get {
        path: String,

        /// JSON value printed when the path is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print the value at a dot path, allowing array indices (items.0.name)
    Query { path: String },

    /// List top-level keys and reserved members
    Keys,

    /// Print the whole tree as JSON
    Dump {
        /// Write a value before dumping, as PATH=JSON (repeatable)
        #[arg(short, long = "write", value_name = "PATH=JSON")]
        writes: Vec<String>,
    },
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

/// Parse a JSON argument, treating anything that isn't valid JSON as a
/// plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_write(raw: &str) -> Result<(&str, Value)> {
    let (path, value) = raw
        .split_once('=')
        .with_context(|| format!("expected PATH=JSON, got '{}'", raw))?;
    Ok((path, parse_value(value)))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    debug!("Starting webui-config v{}", env!("CARGO_PKG_VERSION"));

    let loader = match &args.config {
        Some(path) => ConfigLoader::from_file(path)?,
        None => ConfigLoader::new()?,
    };
    let loader = if args.no_defaults {
        loader.without_defaults()
    } else {
        loader
    };

    if let Some(source) = loader.source() {
        info!("Using configuration file {}", source.display());
    }

    let config = SharedConfig::new(loader.into_store()?);

    match args.command {
        Command::Get { path, default } => {
            let default = default.as_deref().map(parse_value);
            let value = config.load(&path, default).await.unwrap_or(Value::Null);
            print_json(&value)?;
        }
        Command::Query { path } => {
            let tree = config.snapshot();
            let value = utils::get_val(&tree, &path).cloned().unwrap_or(Value::Null);
            print_json(&value)?;
        }
        Command::Keys => {
            for key in config.keys() {
                println!("{}", key);
            }
        }
        Command::Dump { writes } => {
            for raw in &writes {
                let (path, value) = parse_write(raw)?;
                config
                    .save(path, value)
                    .await
                    .with_context(|| format!("failed to write '{}'", path))?;
            }
            print_json(&config.snapshot())?;
        }
    }

    Ok(())
}
