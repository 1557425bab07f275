use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use rate_prowler::sink::jsonl::parse_lines;
use rate_prowler::sink::{ErrorKind, LogLine, Record};

#[derive(Parser)]
#[command(name = "prowler-log")]
#[command(about = "Inspect a rate-prowler JSONL record file", long_about = None)]
struct Cli {
    /// Record file written by the jsonl sink.
    #[arg(short, long, default_value = "rateprowler.jsonl")]
    file: PathBuf,

    /// Only include records from this run.
    #[arg(short, long)]
    run: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-endpoint totals
    Summary,
    /// List run ids in the file
    Runs,
    /// Print matching records as pretty JSON
    Dump,
}

#[derive(Default)]
struct EndpointTotals {
    batches: u64,
    successes: u64,
    failures: u64,
    failure_time: Duration,
    transport_errors: u64,
    http_errors: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let content = std::fs::read_to_string(&cli.file)?;
    let lines: Vec<LogLine> = parse_lines(&content)?
        .into_iter()
        .filter(|l| cli.run.map_or(true, |run| l.run_id == run))
        .collect();

    match cli.command {
        Commands::Summary => print_summary(&lines),
        Commands::Runs => {
            let mut runs: Vec<Uuid> = Vec::new();
            for line in &lines {
                if !runs.contains(&line.run_id) {
                    runs.push(line.run_id);
                }
            }
            for run in runs {
                println!("{run}");
            }
        }
        Commands::Dump => {
            for line in &lines {
                println!("{}", serde_json::to_string_pretty(line)?);
            }
        }
    }

    Ok(())
}

fn print_summary(lines: &[LogLine]) {
    let mut totals: BTreeMap<&str, EndpointTotals> = BTreeMap::new();

    for line in lines {
        match &line.record {
            Record::Batch(batch) => {
                let t = totals.entry(batch.endpoint.as_str()).or_default();
                t.batches += 1;
                t.successes += batch.successes;
                t.failures += batch.failures;
                t.failure_time += batch.failure_duration;
            }
            Record::Error(event) => {
                let t = totals.entry(event.endpoint.as_str()).or_default();
                match event.kind {
                    ErrorKind::Transport { .. } => t.transport_errors += 1,
                    ErrorKind::Http { .. } => t.http_errors += 1,
                }
            }
        }
    }

    if totals.is_empty() {
        eprintln!("No records");
        return;
    }

    for (endpoint, t) in totals {
        let mean_streak = if t.batches > 0 {
            Duration::from_secs_f64(t.failure_time.as_secs_f64() / t.batches as f64)
        } else {
            Duration::ZERO
        };
        println!(
            "{endpoint}: {} batches, {} successes, {} failures, mean failure streak {:?}, \
             errors: {} transport / {} http",
            t.batches, t.successes, t.failures, mean_streak, t.transport_errors, t.http_errors
        );
    }
}
