//! Command-line interface.
//!
//! `discover` runs one explore pass and prints the matching titles;
//! `insights` prints aggregate tables over the filtered catalog.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::{Catalog, Title};
use crate::config::Config;
use crate::explore::{explore, ExploreRequest, Order, SearchField, SortKey};
use crate::filters::Filters;
use crate::insights::Insights;
use crate::logging;
use crate::output::{serialize_structured, OutputMode};
use crate::render::Renderer;

/// Explore a streaming catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "reelscan", version)]
#[command(about = "Filter, search, sort and summarize a streaming catalog CSV")]
pub struct Cli {
    /// Config file (YAML). Defaults to ./reelscan.yaml when present
    #[arg(long, global = true, env = "REELSCAN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog CSV, overriding the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// When to style text output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// More log output on stderr (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and sort titles
    Discover(DiscoverArgs),

    /// Type distribution, top countries and rating by type
    Insights(InsightsArgs),
}

/// Title filters shared by every command.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Keep only this type (repeatable), e.g. "Movie" or "TV Show"
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Earliest release year
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i64>,

    /// Latest release year
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i64>,

    /// Ignore the configured year window
    #[arg(long)]
    pub all_years: bool,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Case-insensitive search text
    #[arg(short = 's', long = "query", visible_alias = "search", value_name = "TEXT")]
    pub query: Option<String>,

    /// Field the search text is matched against
    #[arg(long = "in", value_enum, default_value_t = SearchField::Title)]
    pub search_field: SearchField,

    /// Sort the matches with the merge sort
    #[arg(long)]
    pub sort: bool,

    /// Sort key
    #[arg(long, value_enum, default_value_t = SortKey::ReleaseYear)]
    pub by: SortKey,

    /// Sort order
    #[arg(long, value_enum, default_value_t = Order::Newest)]
    pub order: Order,

    /// Records to keep, overriding page_size
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Entries in the top countries table
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Styling choice for text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Style when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => console::Term::stdout().is_term() && console::colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Loads config, sets up logging and runs the selected command.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(data) = &cli.data {
        config.data = data.clone();
    }

    let env = std::env::var("RUST_LOG").ok();
    logging::init(&logging::filter_directive(
        cli.verbose,
        cli.quiet,
        env.as_deref(),
        &config.log_level,
    ));

    let catalog = Catalog::open(&config.data, &config.defaults)
        .with_context(|| format!("loading catalog {}", config.data.display()))?;

    let styled = !cli.output.is_structured() && cli.color.enabled();
    let rendered = match &cli.command {
        Command::Discover(args) => discover(&catalog, &config, args, cli.output, styled)?,
        Command::Insights(args) => insights(&catalog, &config, args, cli.output, styled)?,
    };

    out.write_all(rendered.as_bytes())
        .context("writing output")?;
    Ok(())
}

fn discover(
    catalog: &Catalog,
    config: &Config,
    args: &DiscoverArgs,
    mode: OutputMode,
    styled: bool,
) -> Result<String> {
    let request = ExploreRequest {
        filters: resolve_filters(catalog, config, &args.filters)?,
        query: args.query.clone(),
        search_field: args.search_field,
        sort: args.sort.then_some((args.by, args.order)),
        limit: args.limit.unwrap_or(config.page_size),
    };
    let view = explore(catalog, &request);

    let text = match mode {
        OutputMode::Text => Renderer::new(styled).cards(&view, config.card_layout())?,
        OutputMode::Table => Renderer::new(styled).table(&view)?,
        OutputMode::Csv => serialize_structured(&view.records, mode, Some(&Title::COLUMNS[..]))?,
        OutputMode::Json | OutputMode::Yaml => serialize_structured(&view, mode, None)?,
    };
    Ok(text)
}

fn insights(
    catalog: &Catalog,
    config: &Config,
    args: &InsightsArgs,
    mode: OutputMode,
    styled: bool,
) -> Result<String> {
    let filters = resolve_filters(catalog, config, &args.filters)?;
    let titles = filters.apply(catalog);
    let insights = Insights::compute(&titles, args.top.unwrap_or(config.top_countries));

    let text = match mode {
        OutputMode::Text | OutputMode::Table => Renderer::new(styled).insights(&insights)?,
        OutputMode::Csv => serialize_structured(
            &insights.to_rows(),
            mode,
            Some(&["section", "label", "type", "count"][..]),
        )?,
        OutputMode::Json | OutputMode::Yaml => serialize_structured(&insights, mode, None)?,
    };
    Ok(text)
}

/// Builds filters, matching `--type` values to catalog types without
/// regard to case.
fn resolve_filters(catalog: &Catalog, config: &Config, args: &FilterArgs) -> Result<Filters> {
    let known = catalog.types();
    let mut types = Vec::with_capacity(args.types.len());
    for wanted in &args.types {
        match known.iter().find(|k| k.eq_ignore_ascii_case(wanted)) {
            Some(kind) => types.push(kind.clone()),
            None => bail!(
                "unknown type {wanted:?}; the catalog has: {}",
                known.join(", ")
            ),
        }
    }

    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            bail!("--from ({from}) is after --to ({to})");
        }
    }

    Ok(Filters::resolve(
        catalog,
        types,
        config.years,
        args.from,
        args.to,
        args.all_years,
    ))
}
