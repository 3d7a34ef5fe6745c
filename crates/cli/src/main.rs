use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use storefront_catalog::VariantCatalog;
use storefront_events::Labels;
use storefront_featured::{sort_items, FeaturedItem, SortOrder};
use storefront_resolver::{
    MatchMode, OptionIndexMap, QuantityDisplay, ReconciliationPolicy, ResolverConfig, Selection,
    VariantResolver,
};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Resolve product variants and order featured products")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a selection against a variant catalog file.
    Resolve(ResolveArgs),
    /// Order featured product cards.
    Sort(SortArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Variant blob (JSON array or id-keyed object).
    #[arg(long)]
    catalog: PathBuf,

    /// Chosen value, `dimension=value`. Repeatable.
    #[arg(long = "select", value_parser = parse_pair::<String>)]
    selections: Vec<(String, String)>,

    /// Option slot of a dimension, `dimension=index`. Repeatable.
    #[arg(long = "option", value_parser = parse_pair::<usize>)]
    options: Vec<(String, usize)>,

    /// Overrides STOREFRONT_MATCH_MODE.
    #[arg(long)]
    match_mode: Option<MatchMode>,

    /// Overrides STOREFRONT_RECONCILE.
    #[arg(long)]
    reconcile: Option<ReconciliationPolicy>,

    /// Overrides STOREFRONT_QUANTITY_DISPLAY.
    #[arg(long)]
    quantity_display: Option<QuantityDisplay>,

    /// Translations blob with `in_stock` / `sold_out` labels.
    #[arg(long)]
    translations: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SortArgs {
    /// JSON array of featured items.
    #[arg(long)]
    items: PathBuf,

    /// Dropdown value, e.g. `price-ascending`.
    #[arg(long, default_value = "manual")]
    order: String,
}

fn parse_pair<T>(raw: &str) -> Result<(String, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    let value = value.parse::<T>().map_err(|e| format!("bad value in `{raw}`: {e}"))?;
    Ok((key.to_string(), value))
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let mut config = ResolverConfig::from_env().context("invalid STOREFRONT_* environment")?;
    if let Some(mode) = args.match_mode {
        config.match_mode = mode;
    }
    if let Some(reconcile) = args.reconcile {
        config.availability.reconciliation = reconcile;
    }
    if let Some(quantity_display) = args.quantity_display {
        config.availability.quantity_display = quantity_display;
    }

    let catalog = VariantCatalog::from_json(&read(&args.catalog)?)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?;
    let labels = match &args.translations {
        Some(path) => Labels::from_json(&read(path)?)
            .with_context(|| format!("failed to parse translations {}", path.display()))?,
        None => Labels::default(),
    };

    let selection = Selection::from_pairs(args.selections);
    let index_map = (!args.options.is_empty()).then(|| {
        let mut map = OptionIndexMap::new();
        for (dimension, position) in &args.options {
            map.insert(dimension, *position);
        }
        map
    });

    let state = VariantResolver::new(config).resolve(&catalog, &selection, index_map.as_ref());
    let output = json!({
        "state": state,
        "availability_text": labels.availability_text(&state),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_sort(args: SortArgs) -> anyhow::Result<()> {
    let mut items: Vec<FeaturedItem> = serde_json::from_str(&read(&args.items)?)
        .with_context(|| format!("failed to parse items {}", args.items.display()))?;
    let order = SortOrder::parse(&args.order);
    sort_items(&mut items, order);
    tracing::debug!(order = order.as_str(), items = items.len(), "featured items sorted");
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        storefront_observability::init_with_default("debug");
    } else {
        storefront_observability::init();
    }

    match cli.command {
        Commands::Resolve(args) => run_resolve(args),
        Commands::Sort(args) => run_sort(args),
    }
}
