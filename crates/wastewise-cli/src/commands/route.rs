use clap::Subcommand;
use std::io::Read;
use std::path::{Path, PathBuf};
use wastewise_core::{ingest_snapshot, BinPrioritizer, BinSnapshot};

#[derive(Subcommand)]
pub enum RouteAction {
    /// Ranked pickup order for active bins above 50%
    Prioritize {
        /// Bin snapshot JSON file ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Bins at or above 90%, regardless of status
    Critical {
        /// Bin snapshot JSON file ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Pickup order, critical bins and rejected records together
    Plan {
        /// Bin snapshot JSON file ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,
    },
}

fn read_snapshot(input: &Path) -> Result<BinSnapshot, Box<dyn std::error::Error>> {
    tracing::debug!(input = %input.display(), "reading bin snapshot");
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let snapshot = ingest_snapshot(&value)?;
    for rejected in &snapshot.rejected {
        eprintln!("skipped {}: {}", rejected.id, rejected.reason);
    }
    Ok(snapshot)
}

pub fn run(action: RouteAction) -> Result<(), Box<dyn std::error::Error>> {
    let prioritizer = BinPrioritizer::new();

    match action {
        RouteAction::Prioritize { input } => {
            let snapshot = read_snapshot(&input)?;
            let stops = prioritizer.rank(&snapshot.bins);
            println!("{}", serde_json::to_string_pretty(&stops)?);
        }
        RouteAction::Critical { input } => {
            let snapshot = read_snapshot(&input)?;
            let critical = prioritizer.find_critical(&snapshot.bins);
            println!("{}", serde_json::to_string_pretty(&critical)?);
        }
        RouteAction::Plan { input } => {
            let snapshot = read_snapshot(&input)?;
            let plan = prioritizer.plan(&snapshot.bins);
            let report = serde_json::json!({
                "stops": plan.stops,
                "critical": plan.critical,
                "rejected": snapshot.rejected,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
