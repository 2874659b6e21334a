use anyhow::Context;
use clap::Parser;
use framepace_cli::analyze;
use framepace_cli::input::{load_capture, load_config, sort_runs};
use framepace_cli::render::{render_table, Marking};
use framepace_common::{AnalysisConfig, Metric};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framepace", about = "Rank frame pacing across GPU interrupt affinity runs")]
struct Args {
    /// JSON capture file: {"runs": [{"id": "0", "samples": [16.6, ...]}, ...]}
    input: PathBuf,

    /// JSON analysis config; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric to report, repeatable: max | avg | min | stdev | percentile:<p> | lows:<p>
    #[arg(long = "metric", value_parser = parse_metric)]
    metrics: Vec<Metric>,

    /// Number of highlighted ranks per metric
    #[arg(long)]
    tiers: Option<usize>,

    /// Print the ranked table as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Mark leaders with `*` and `+` instead of colors
    #[arg(long)]
    no_color: bool,

    /// Keep runs in file order instead of sorting by id
    #[arg(long)]
    keep_order: bool,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e:#}");
        process::exit(2);
    });

    let capture = load_capture(&args.input).unwrap_or_else(|e| {
        eprintln!("Failed to load captures: {e:#}");
        process::exit(2);
    });

    let mut runs = capture.into_runs().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    if !args.keep_order {
        sort_runs(&mut runs);
    }
    for run in &runs {
        debug!(run = %run.run_id, samples = run.samples.count(), "run loaded");
    }

    info!(runs = runs.len(), metrics = config.metrics.len(), "analyzing captures");
    let table = analyze(&runs, &config).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    info!("ranking complete");

    if args.json {
        match serde_json::to_string_pretty(&table) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize results: {e}");
                process::exit(1);
            }
        }
    } else {
        let marking = if args.no_color { Marking::Plain } else { Marking::Color };
        print!("{}", render_table(&table, marking));
    }
}

/// Config file first, then command-line overrides, validated once.
fn resolve_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if !args.metrics.is_empty() {
        config.metrics = args.metrics.clone();
    }
    if let Some(tiers) = args.tiers {
        config.tiers = tiers;
    }
    config.validate().context("validating analysis config")?;
    Ok(config)
}

fn parse_metric(name: &str) -> Result<Metric, String> {
    Metric::from_name(name).ok_or_else(|| {
        format!("unknown metric {name:?}. Valid values: max, avg, min, stdev, percentile:<p>, lows:<p>")
    })
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        "framepace=debug,framepace_cli=debug"
    } else {
        "framepace=info,framepace_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
