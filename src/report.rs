/*!
 * Text Reports
 * Human-readable timeline, per-process table and summary
 */

use crate::core::types::Tick;
use crate::process::ProcessRow;
use crate::scheduler::{SchedulerStats, SimulationOutcome, Slice, Summary};
use std::fmt;

const HEADERS: [&str; 9] = [
    "ID",
    "Arrival",
    "Burst",
    "Priority",
    "Start",
    "Completion",
    "Turnaround",
    "Waiting",
    "Response",
];

/// Display adapter rendering a whole outcome as text
pub struct TextReport<'a> {
    outcome: &'a SimulationOutcome,
}

impl<'a> TextReport<'a> {
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self { outcome }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timeline:")?;
        writeln!(f, "{}", Timeline(&self.outcome.timeline))?;
        writeln!(f)?;
        write!(f, "{}", ResultsTable(&self.outcome.processes))?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            SummaryBlock {
                summary: &self.outcome.summary,
                stats: &self.outcome.stats,
            }
        )
    }
}

/// `start-end:id@Q<level>` entries joined by ` | `
pub struct Timeline<'a>(pub &'a [Slice]);

impl fmt::Display for Timeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slice) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(
                f,
                "{}-{}:{}@{}",
                slice.start, slice.end, slice.process, slice.level
            )?;
        }
        Ok(())
    }
}

/// Right-aligned per-process table, `N/A` for missing values
pub struct ResultsTable<'a>(pub &'a [ProcessRow]);

fn cell(value: Option<Tick>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 9]> = self
            .0
            .iter()
            .map(|row| {
                [
                    row.id.to_string(),
                    row.arrival.to_string(),
                    row.burst.to_string(),
                    row.priority.to_string(),
                    cell(row.first_start),
                    cell(row.completion),
                    cell(row.turnaround),
                    row.waiting.to_string(),
                    cell(row.response),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.len());
            }
        }

        write_row(f, &HEADERS, &widths)?;
        let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        writeln!(f, "{}", "-".repeat(rule))?;
        for row in &rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, cells: &[S], widths: &[usize]) -> fmt::Result {
    for (i, (value, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            f.write_str("  ")?;
        }
        write!(f, "{:>width$}", value.as_ref(), width = width)?;
    }
    writeln!(f)
}

/// Averages, utilization and counters
pub struct SummaryBlock<'a> {
    pub summary: &'a Summary,
    pub stats: &'a SchedulerStats,
}

impl fmt::Display for SummaryBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Completed processes: {}", s.completed)?;
        writeln!(f, "Average waiting time: {:.2}", s.avg_waiting)?;
        writeln!(f, "Average turnaround time: {:.2}", s.avg_turnaround)?;
        writeln!(f, "Average response time: {:.2}", s.avg_response)?;
        writeln!(f, "CPU utilization: {:.2}%", s.cpu_utilization)?;
        writeln!(f, "Makespan: {}", s.makespan)?;
        writeln!(
            f,
            "Dispatches: {}, context switches: {}, preemptions: {}, demotions: {}, promotions: {}, idle ticks: {}",
            self.stats.dispatches,
            self.stats.context_switches,
            self.stats.preemptions,
            self.stats.demotions,
            self.stats.promotions,
            self.stats.idle_ticks
        )
    }
}
