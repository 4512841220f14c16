use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use order_reconciler::logging::{init_logging, parse_rotation, LogConfig};
use order_reconciler::order::{IdKind, ItemId, OrderIndex, OrderKind, Ordinal};
use order_reconciler::store::read_header;
use order_reconciler::{
    ConfigSource, EventBus, FileRepository, OrderRepository, ReconcilerSettings, ReorderRequest,
    ReorderService, UserRequestPrecedence,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Order Reconciler - conflict-free order indexes for JSON collections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.order-reconciler/config.toml)
    #[arg(long, env = "ORDER_RECONCILER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable JSON log format
    #[arg(long, env = "ORDER_RECONCILER_LOG_JSON", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "ORDER_RECONCILER_LOG_ROTATION", global = true)]
    log_rotation: Option<String>,

    /// Custom log directory (default: ~/.order-reconciler/logs)
    #[arg(long, env = "ORDER_RECONCILER_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a reorder request to a collection file
    Reorder {
        /// Collection file
        #[arg(long)]
        collection: PathBuf,

        /// Request file: {"items": [{"id": "1", "desiredOrder": 2}]}
        #[arg(long)]
        request: PathBuf,

        /// overwrite or conflict-avoid (default from config)
        #[arg(long)]
        precedence: Option<UserRequestPrecedence>,

        /// Treat an order value of zero as missing
        #[arg(long)]
        treat_zero_as_unset: bool,

        /// Print the result without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the items of a collection in order
    Show {
        /// Collection file
        #[arg(long)]
        collection: PathBuf,
    },
}

/// What to do once the collection's types are known.
enum Action {
    Reorder {
        request: ReorderRequest,
        settings: ReconcilerSettings,
        dry_run: bool,
    },
    Show,
}

#[allow(clippy::print_stdout)]
fn print_json<S: Serialize>(value: &S) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_request(path: &Path) -> Result<ReorderRequest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read request {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("Invalid request {}", path.display()))
}

async fn execute<I: ItemId, T: OrderIndex>(collection: &Path, action: Action) -> Result<()> {
    let repository = FileRepository::<I, T>::open(collection).await?;
    match action {
        Action::Show => {
            let mut items = repository.load_items().await?;
            items.sort_by(|a, b| match (a.order, b.order) {
                (Some(x), Some(y)) => Ordinal(x).cmp(&Ordinal(y)).then_with(|| a.id.cmp(&b.id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.id.cmp(&b.id),
            });
            print_json(&items)
        }
        Action::Reorder {
            request,
            settings,
            dry_run,
        } => {
            let service = ReorderService::new(repository, settings, EventBus::default());
            let result = if dry_run {
                service.preview(&request).await?
            } else {
                service.reorder(&request).await?
            };
            if !result.adjusted.is_empty() {
                warn!(
                    "{} requested items did not get their desired value",
                    result.adjusted.len()
                );
            }
            print_json(&result)
        }
    }
}

async fn dispatch<I: ItemId>(kind: OrderKind, collection: &Path, action: Action) -> Result<()> {
    match kind {
        OrderKind::Int32 => execute::<I, i32>(collection, action).await,
        OrderKind::Int64 => execute::<I, i64>(collection, action).await,
        OrderKind::Float32 => execute::<I, f32>(collection, action).await,
        OrderKind::Float64 | OrderKind::Decimal => execute::<I, f64>(collection, action).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_source = ConfigSource::locate(args.config.as_deref());
    let config = config_source.load()?;
    let mut log_config = LogConfig::from(&config.logging);
    if args.log_json {
        log_config.json_format = true;
    }
    if let Some(rotation) = &args.log_rotation {
        log_config.rotation = parse_rotation(rotation);
    }
    if let Some(dir) = args.log_dir {
        log_config.log_dir = dir;
    }
    init_logging(log_config)?;
    config_source.log();

    let (collection, action) = match args.command {
        Command::Reorder {
            collection,
            request,
            precedence,
            treat_zero_as_unset,
            dry_run,
        } => {
            let mut settings = config.reconciler;
            if let Some(precedence) = precedence {
                settings.precedence = precedence;
            }
            settings.treat_zero_as_unset |= treat_zero_as_unset;
            let request = read_request(&request).await?;
            (
                collection,
                Action::Reorder {
                    request,
                    settings,
                    dry_run,
                },
            )
        }
        Command::Show { collection } => (collection, Action::Show),
    };

    let header = read_header(&collection)
        .await
        .wrap_err_with(|| format!("Failed to open collection {}", collection.display()))?;
    info!(
        "Collection '{}' stores {} order values keyed by {} ids",
        header.name, header.order_kind, header.id_kind
    );
    let order_kind = header.order_kind()?;
    match header.id_kind()? {
        IdKind::Integer => dispatch::<i64>(order_kind, &collection, action).await,
        IdKind::String => dispatch::<String>(order_kind, &collection, action).await,
        IdKind::Uuid => dispatch::<Uuid>(order_kind, &collection, action).await,
    }
}
