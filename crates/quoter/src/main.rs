use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tickguard_quoter::{create_example_config, QueryOutcome, QueryReport, QuoterConfig, Scenario};

#[derive(Parser, Debug)]
#[command(name = "tickguard-quoter")]
#[command(about = "Run spot/TWAP oracle quotes against simulated pools")]
struct Args {
    /// Path to scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    config: PathBuf,

    /// Write an example scenario to the config path and exit
    #[arg(long)]
    init: bool,

    /// Block time to quote at, overriding the scenario's
    #[arg(long)]
    now: Option<u32>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.init {
        create_example_config(&args.config)
            .with_context(|| format!("writing {}", args.config.display()))?;
        info!("Example scenario written to {}", args.config.display());
        return Ok(());
    }

    let mut config = QuoterConfig::load(&args.config)?;
    if let Some(now) = args.now {
        config.now = now;
    }
    info!(
        "Loaded scenario with {} assets, {} pools, {} queries",
        config.assets.len(),
        config.pools.len(),
        config.queries.len()
    );

    let scenario = Scenario::build(&config)?;
    let reports = scenario.run_queries(&config.queries)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let failed = reports
        .iter()
        .filter(|report| report.outcome.amount_out().is_none())
        .count();
    if failed > 0 {
        warn!("{} of {} queries failed", failed, reports.len());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "tickguard_quoter={0},tickguard_core={0},tickguard_simulation={0}",
                    default_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_report(report: &QueryReport) {
    match &report.outcome {
        QueryOutcome::Quoted {
            amount_out,
            route,
            breakdown,
        } => {
            println!(
                "{}: {} {} -> {} {}",
                report.label, report.amount_in, report.token_in, amount_out, report.token_out
            );
            if let Some(breakdown) = breakdown {
                println!(
                    "    via {} | spot tick {} -> {} | twap({}s) tick {} -> {} | selected {:?}",
                    route.join(" > "),
                    breakdown.spot_tick,
                    breakdown.spot_amount,
                    report.period,
                    breakdown.twap_tick,
                    breakdown.twap_amount,
                    breakdown.selected
                );
            }
        }
        QueryOutcome::Failed { error } => {
            println!("{}: failed: {}", report.label, error);
        }
    }
}
