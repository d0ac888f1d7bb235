/// Version injected at compile time via HWCLOUD_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("HWCLOUD_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::TryStreamExt;
use hwcloud::bss::{QueryOrderDetail, QueryOrderList};
use hwcloud::cloud::auth::validate_scope_id;
use hwcloud::cloud::http::describe_error;
use hwcloud::compute::WaitOptions;
use hwcloud::{CloudClient, Config};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for Huawei Cloud compute and billing
#[derive(Parser, Debug)]
#[command(name = "hwcloud", version = VERSION, about, long_about = None)]
struct Args {
    /// Region to use
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Project scoping compute calls
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Account (domain) scoping billing calls
    #[arg(short, long, global = true)]
    domain: Option<String>,

    /// Compute API microversion
    #[arg(long, global = true)]
    microversion: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List servers
    Servers {
        /// Fetch full details
        #[arg(long)]
        details: bool,
        /// Only servers in this status
        #[arg(long)]
        status: Option<String>,
        /// Only servers whose name matches
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a server by name or id
    Server { name_or_id: String },
    /// List flavors
    Flavors {
        #[arg(long)]
        details: bool,
    },
    /// List keypairs
    Keypairs,
    /// Wait until a server reaches a status
    Wait {
        name_or_id: String,
        #[arg(long, default_value = "ACTIVE")]
        status: String,
        /// Seconds between polls
        #[arg(long, default_value_t = 2)]
        interval: u64,
        /// Seconds to wait in total
        #[arg(long, default_value_t = 120)]
        timeout: u64,
    },
    /// Query orders
    Orders {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page_size: Option<i64>,
        #[arg(long)]
        page_index: Option<i64>,
    },
    /// Show one order with its line items
    Order { order_id: String },
    /// Save region, project and domain to the config file
    Configure,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        },
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("hwcloud {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hwcloud").join("hwcloud.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hwcloud").join("hwcloud.log");
    }
    PathBuf::from("hwcloud.log")
}

/// Config file and environment, then flags
fn resolve_config(args: &Args) -> Config {
    let mut config = Config::load();
    if let Some(region) = &args.region {
        config.region = Some(region.clone());
    }
    if let Some(project) = &args.project {
        config.project_id = Some(project.clone());
    }
    if let Some(domain) = &args.domain {
        config.domain_id = Some(domain.clone());
    }
    if let Some(version) = &args.microversion {
        config.compute_microversion = Some(version.clone());
    }
    config
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = resolve_config(&args);

    if let Command::Configure = args.command {
        for (label, id) in [("project", &config.project_id), ("domain", &config.domain_id)] {
            if let Some(id) = id.as_deref().filter(|id| !validate_scope_id(id)) {
                eprintln!("Warning: {} id '{}' does not look like a 32-character hex id", label, id);
            }
        }
        config.save().context("Failed to save configuration")?;
        if let Some(path) = Config::config_path() {
            println!("Saved {}", path.display());
        }
        return Ok(());
    }

    let client = CloudClient::new(&config).context("Failed to create client")?;

    if let Err(e) = run(&client, args.command).await {
        tracing::error!("Command failed: {:#}", e);
        match e.downcast_ref::<hwcloud::Error>() {
            Some(err) => eprintln!("Error: {}", describe_error(err)),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &CloudClient, command: Command) -> Result<()> {
    let compute = client.compute();
    let bss = client.bss();

    match command {
        Command::Servers {
            details,
            status,
            name,
        } => {
            let mut query = Vec::new();
            if let Some(status) = status.as_deref() {
                query.push(("status", status));
            }
            if let Some(name) = name.as_deref() {
                query.push(("name", name));
            }
            let servers: Vec<_> = compute.servers(details, true, &query).try_collect().await?;
            print_json(&servers)
        },
        Command::Server { name_or_id } => {
            let server = compute
                .find_server(&name_or_id, false)
                .await?
                .with_context(|| format!("No server named {}", name_or_id))?;
            print_json(&server)
        },
        Command::Flavors { details } => {
            let flavors: Vec<_> = compute.flavors(details, true, &[]).try_collect().await?;
            print_json(&flavors)
        },
        Command::Keypairs => {
            let keypairs: Vec<_> = compute.keypairs().try_collect().await?;
            print_json(&keypairs)
        },
        Command::Wait {
            name_or_id,
            status,
            interval,
            timeout,
        } => {
            let server = compute
                .find_server(&name_or_id, false)
                .await?
                .with_context(|| format!("No server named {}", name_or_id))?;
            let options = WaitOptions {
                interval: Duration::from_secs(interval),
                wait: Duration::from_secs(timeout),
                ..WaitOptions::status(&status)
            };
            let server = compute.wait_for_server(server, options).await?;
            print_json(&server)
        },
        Command::Orders {
            status,
            page_size,
            page_index,
        } => {
            let orders = bss
                .query_order_list(QueryOrderList {
                    status,
                    page_size,
                    page_index,
                    ..Default::default()
                })
                .await?;
            print_json(&orders)
        },
        Command::Order { order_id } => {
            let order = bss
                .query_order_detail(QueryOrderDetail {
                    order_id: Some(order_id),
                    ..Default::default()
                })
                .await?;
            print_json(&order)
        },
        Command::Configure => Ok(()),
    }
}
