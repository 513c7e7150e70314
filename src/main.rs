/*!
 * MLFQ Simulator - Command Line Entry Point
 *
 * Loads a workload file (or the built-in workload), applies command-line
 * overrides, runs the simulation and prints a text or JSON report.
 */

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use mlfq_sim::{
    init_tracing, load_workload, simulate, simulate_with_frames, TextReport, Workload,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Multi-level feedback queue CPU scheduler simulator
#[derive(Debug, Parser)]
#[clap(name = "mlfq", version)]
struct Opts {
    /// Workload file; the built-in workload is used when omitted
    workload: Option<PathBuf>,

    /// Per-queue time quanta, highest priority first (e.g. 3,3,3,3)
    #[clap(short = 'q', long, value_delimiter = ',', num_args = 1..)]
    quanta: Option<Vec<u64>>,

    /// CPU ticks at one level before demotion (0 disables)
    #[clap(short = 'd', long)]
    demote: Option<u64>,

    /// Waiting ticks before an aging promotion (0 disables)
    #[clap(short = 'a', long)]
    aging: Option<u64>,

    /// Let a running process finish its slice when a higher-priority process arrives
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_preempt: bool,

    /// Output format
    #[clap(short = 'f', long, value_enum, default_value = "text")]
    format: Format,

    /// Include per-dispatch snapshots (JSON output only)
    #[clap(long, action = clap::ArgAction::SetTrue)]
    frames: bool,

    /// Sort result rows by process id instead of input order
    #[clap(long, action = clap::ArgAction::SetTrue)]
    sort_by_id: bool,
}

fn main() -> Result<()> {
    init_tracing("warn");
    let opts = Opts::parse();

    let mut workload = match &opts.workload {
        Some(path) => load_workload(path)?,
        None => {
            info!("No workload file given, using the built-in workload");
            Workload::default()
        }
    };

    let mut config = workload.config;
    if let Some(quanta) = &opts.quanta {
        config = config.with_quanta(quanta.iter().copied())?;
    }
    if let Some(demote) = opts.demote {
        config = config.with_demote_threshold(demote);
    }
    if let Some(aging) = opts.aging {
        config = config.with_aging_threshold(aging);
    }
    if opts.no_preempt {
        config = config.with_preemption(false);
    }
    workload.config = config;

    let with_frames = opts.frames && opts.format == Format::Json;
    let mut outcome = if with_frames {
        simulate_with_frames(&workload.processes, &workload.config)?
    } else {
        simulate(&workload.processes, &workload.config)?
    };
    if opts.sort_by_id {
        outcome.sort_rows_by_id();
    }

    match opts.format {
        Format::Text => print!("{}", TextReport::new(&outcome)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&outcome).into_diagnostic()?;
            println!("{}", json);
        }
    }

    Ok(())
}
