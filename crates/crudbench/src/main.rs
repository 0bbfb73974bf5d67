//! crudbench - compare insert/select/delete latency across databases.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crudbench::{plots, report, run_suite, Args, Backend};

fn main() {
    // Logs go to stderr so JSON/CSV on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crudbench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let format = args.format;
    let config = args.into_config();
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backends = ?config.backends,
        record_counts = ?config.record_counts,
        "starting benchmark suite"
    );

    // Connections are released as soon as the suite finishes
    let mut backends = config
        .backends
        .iter()
        .map(|kind| kind.open(&config))
        .collect::<Result<Vec<Box<dyn Backend>>, _>>()?;

    let results = run_suite(&mut backends, &config.record_counts)?;
    drop(backends);

    println!("{}", report::render(&results, format)?);

    if let Some(path) = &config.chart_path {
        plots::render_to_file(&results, path)?;
    }

    Ok(())
}
