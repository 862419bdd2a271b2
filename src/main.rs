use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use segment_graph::GraphConfig;
use tracing::info;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

#[derive(Debug, Parser)]
#[command(
    name = "segment-graph",
    about = "Build the stop segment graph of a GTFS feed."
)]
struct Opt {
    /// Directory holding stops.txt, stop_times.txt, trips.txt and routes.txt.
    #[arg(short = 'i', long = "input", default_value = ".")]
    input: PathBuf,

    /// TOML file with `route_types` and `zone_ids`.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Route type to keep, replaces the configured set. Repeatable.
    #[arg(long = "route-type")]
    route_types: Vec<String>,

    /// Zone id to keep, replaces the configured set. Repeatable.
    #[arg(long = "zone")]
    zones: Vec<String>,

    /// Print every edge as `from<TAB>to<TAB>avg_time_min`.
    #[arg(long)]
    edges: bool,
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter_subscriber = EnvFilter::try_new(rust_log).unwrap_or_else(|e| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            e,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter_subscriber)
        .init();
}

fn load_config(opt: &Opt) -> anyhow::Result<GraphConfig> {
    let mut config = match &opt.config {
        Some(path) => GraphConfig::from_file(path)
            .with_context(|| format!("loading configuration {path:?}"))?,
        None => GraphConfig::default(),
    };
    if !opt.route_types.is_empty() {
        config.route_types = opt.route_types.iter().cloned().collect();
    }
    if !opt.zones.is_empty() {
        config.zone_ids = opt.zones.iter().cloned().collect();
    }
    Ok(config)
}

fn run(opt: Opt) -> anyhow::Result<()> {
    info!("Launching segment-graph...");
    let config = load_config(&opt)?;

    let feed = segment_graph::read_feed(&opt.input)
        .with_context(|| format!("reading feed from {:?}", opt.input))?;
    let graph = segment_graph::build(&feed, &config);

    println!(
        "nodes: {}\nedges: {}\ngeocoded nodes: {}",
        graph.node_count(),
        graph.edge_count(),
        graph.nodes().filter(|node| node.coord.is_some()).count()
    );
    if opt.edges {
        for (from, to, edge) in graph.edges() {
            println!("{from}\t{to}\t{:.2}", edge.avg_time_min);
        }
    }
    Ok(())
}

fn main() {
    init_logger();
    if let Err(err) = run(Opt::parse()) {
        for cause in err.chain() {
            eprintln!("{cause}");
        }
        std::process::exit(1);
    }
}
