use anyhow::{Context, Result};
use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strat_outputs::{
    config::{DEFAULT_HISTOGRAM_BINS, DEFAULT_MARKER, DEFAULT_OUTPUT_DIR, MAX_HISTOGRAM_BINS},
    format_quartiles_line, load_value_series, summarize, AggregatorConfig, SeriesOverview,
    StrategyReport,
};

#[derive(Parser, Debug)]
#[command(name = "strat-outputs")]
#[command(about = "Summarize Monte Carlo portfolio simulation outputs")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate every Monte Carlo run of a strategy and report end value quartiles
    Montecarlo {
        /// Strategy name to match inside run filenames (e.g. DCA_SPGold)
        strategy: String,

        /// Directory containing the simulator CSV outputs
        #[arg(short, long, env = "STRAT_OUTPUTS_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Filename marker identifying Monte Carlo runs
        #[arg(short, long, env = "STRAT_OUTPUTS_MARKER", default_value = DEFAULT_MARKER)]
        marker: String,

        /// Number of histogram bins for the end value distribution
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_HISTOGRAM_BINS,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_HISTOGRAM_BINS as u64)
        )]
        bins: usize,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a single strategy output file and show its value series
    Show {
        /// Path to a semicolon-delimited CSV with a "Value" column
        path: PathBuf,

        /// Print the overview as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // stdout is reserved for reports
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Commands::Montecarlo { strategy, output_dir, marker, bins, json } => {
            let config = AggregatorConfig {
                output_dir,
                marker,
                histogram_bins: bins,
            };
            run_montecarlo(&config, &strategy, json)?;
        }
        Commands::Show { path, json } => {
            run_show(path, json)?;
        }
    }

    Ok(())
}

fn run_montecarlo(config: &AggregatorConfig, strategy: &str, json: bool) -> Result<()> {
    info!("=== MONTE CARLO SUMMARY ===");
    info!("Output directory: {:?}", config.output_dir);
    info!("Marker: {}, strategy: {}", config.marker, strategy);

    let summary = summarize(config, strategy)
        .with_context(|| format!("Failed to summarize strategy '{}'", strategy))?;

    let report = StrategyReport::from_summary(&summary);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    info!("{}", format_quartiles_line(&summary.quartiles));
    Ok(())
}

fn run_show(path: PathBuf, json: bool) -> Result<()> {
    info!("Loading {:?}", path);

    let series = load_value_series(&path)
        .with_context(|| format!("Failed to load value series from {:?}", path))?;

    let overview = SeriesOverview::new(&path, &series)
        .with_context(|| format!("No values in {:?}", path))?;

    if json {
        println!("{}", overview.to_json()?);
    } else {
        print!("{}", overview.render_text());
    }
    Ok(())
}
