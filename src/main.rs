use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use motorwatch::{
    AnomalyModelConfig, FileSource, HealthSnapshot, MonitorConfig, MonitoringSession,
    PipelineError, ReadingSource, SchemaVersion, SessionReport, StreamSource,
};

#[derive(Parser, Debug)]
#[command(name = "motorwatch")]
#[command(about = "Predictive-maintenance monitor for DC motor sensor feeds")]
struct Args {
    /// Path to a newline-delimited JSON feed of readings
    #[arg(short, long, default_value = "readings.jsonl", conflicts_with_all = ["connect"])]
    file: PathBuf,

    /// Connect to a TCP endpoint for a live feed (host:port)
    #[arg(short, long, conflicts_with_all = ["file", "follow"])]
    connect: Option<String>,

    /// Configuration file (TOML); MOTORWATCH_* environment variables apply on top
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of recent verdicts used for RUL estimation
    #[arg(short, long)]
    window: Option<usize>,

    /// Readings accepted before the session finalizes
    #[arg(long)]
    cap: Option<usize>,

    /// Fault decision threshold in (0, 1)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Run without the anomaly detector
    #[arg(long)]
    no_anomaly: bool,

    /// Keep following the file for appended readings
    #[arg(long)]
    follow: bool,

    /// Idle poll interval in milliseconds
    #[arg(short, long, default_value = "100")]
    refresh: u64,

    /// Print each snapshot as one JSON line
    #[arg(long)]
    json: bool,

    /// Write the final session report to a JSON file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut session = config.build_session()?;
    info!(
        "Models: {} (snapshot schema v{})",
        session.pipeline().describe_models(),
        SchemaVersion::current()
    );

    let idle = Duration::from_millis(args.refresh);

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        run_with_tcp(addr, &mut session, &args, idle)?;
    } else {
        let source = FileSource::new(&args.file).follow(args.follow);
        run(Box::new(source), &mut session, args.json, idle)?;
    }

    session.close();
    if !args.json {
        print_summary(&session);
    }

    if let Some(ref export_path) = args.export {
        SessionReport::from_session(&session).write_json(export_path)?;
        info!("Exported session report to {}", export_path.display());
    }

    Ok(())
}

/// Load file and environment configuration, then apply command-line overrides.
fn load_config(args: &Args) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::load(args.config.as_deref())?;

    if let Some(window) = args.window {
        config.session.window = window;
    }
    if let Some(cap) = args.cap {
        config.session.sample_cap = cap;
    }
    if let Some(threshold) = args.threshold {
        config.decision_threshold = threshold;
    }
    if args.no_anomaly {
        config.anomaly_model = AnomalyModelConfig::Disabled;
    }

    config.validate().context("Invalid command-line options")?;
    Ok(config)
}

/// Run with a TCP stream source
fn run_with_tcp(
    addr: &str,
    session: &mut MonitoringSession,
    args: &Args,
    idle: Duration,
) -> Result<()> {
    // The runtime must outlive the loop: the reader task lives on it.
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        info!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                info!("Connected");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn ReadingSource>)
            }
            Err(e) => Err(anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    run(source, session, args.json, idle)
}

/// Feed every record from `source` into the session until the source ends
/// or the session finalizes.
fn run(
    mut source: Box<dyn ReadingSource>,
    session: &mut MonitoringSession,
    json: bool,
    idle: Duration,
) -> Result<()> {
    info!("Reading from {}", source.description());
    let mut last_error: Option<String> = None;

    while !session.is_finalized() {
        let Some(record) = source.poll() else {
            let error = source.error();
            if let Some(ref message) = error {
                if error != last_error {
                    warn!("{}: {}", source.description(), message);
                }
            }
            last_error = error;

            if source.is_finished() {
                break;
            }
            std::thread::sleep(idle);
            continue;
        };

        let reading = record.reading();
        let result = match record.fault {
            Some(fault) => session.advance_labeled(reading, fault),
            None => session.advance(reading),
        };

        match result {
            Ok(snapshot) => print_snapshot(snapshot, json)?,
            Err(e @ PipelineError::NonMonotonicTime { .. }) => {
                warn!("Skipping reading: {}", e);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to process reading at {}s", reading.time));
            }
        }
    }

    if session.is_empty() {
        if let Some(error) = source.error() {
            return Err(anyhow!("No readings from {}: {}", source.description(), error));
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &HealthSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    println!(
        "t={:>5}s  [{:<4}]  RUL fault {:>3}%  anomaly {:>3}%  faults {:>3}  anomalies {:>3}  {}",
        snapshot.time,
        snapshot.status.symbol(),
        snapshot.rul_fault_pct,
        snapshot.rul_anomaly_pct,
        snapshot.fault_count,
        snapshot.anomaly_count,
        snapshot.corrective_actions.join(" | "),
    );
    Ok(())
}

fn print_summary(session: &MonitoringSession) {
    let Some(snapshot) = session.snapshot() else {
        println!("No readings processed.");
        return;
    };

    println!();
    println!(
        "Session {} after {} readings: {} (fault RUL {}%, anomaly RUL {}%)",
        session.state().label(),
        snapshot.samples,
        snapshot.status.symbol(),
        snapshot.rul_fault_pct,
        snapshot.rul_anomaly_pct,
    );

    let summary = session.maintenance_summary();
    if summary.is_empty() {
        println!("Maintenance summary: nothing to report.");
    } else {
        println!("Maintenance summary:");
        for suggestion in summary {
            println!("  - {}", suggestion);
        }
    }

    if let Some(accuracy) = session.accuracy() {
        println!("Fault prediction accuracy: {:.1}%", accuracy * 100.0);
    }
}
