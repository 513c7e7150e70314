/*!
 * Workload Parser
 * Line-oriented settings and process definitions
 */

use super::defaults::default_processes;
use super::Workload;
use crate::core::errors::{LoadError, LoadResult};
use crate::core::types::Tick;
use crate::process::ProcessSpec;
use crate::scheduler::{SchedulerConfig, TimeQuantum, DEFAULT_QUANTUM};
use tracing::{debug, warn};

/// One meaningful line of a workload file
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Quantum { level: usize, ticks: Tick },
    Demote(Tick),
    Aging(Tick),
    Preempt(bool),
    Process(ProcessSpec),
    Skip,
}

/// Parse a workload from text
///
/// Settings start from [`SchedulerConfig::default`]; a text without process
/// lines yields the built-in default processes.
pub fn parse_workload(text: &str) -> LoadResult<Workload> {
    let mut config = SchedulerConfig::default();
    let mut processes = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        match parse_line(line, raw)? {
            Line::Quantum { level, ticks } => set_quantum(&mut config, level, ticks)?,
            Line::Demote(ticks) => config.demote_threshold = ticks,
            Line::Aging(ticks) => config.aging_threshold = ticks,
            Line::Preempt(enabled) => config.preempt_on_arrival = enabled,
            Line::Process(spec) => processes.push(spec),
            Line::Skip => {}
        }
    }

    config.validate()?;

    if processes.is_empty() {
        warn!("No process lines found, using the default workload");
        processes = default_processes();
    }

    debug!(
        "Parsed workload: {} processes, {} queues",
        processes.len(),
        config.levels()
    );
    Ok(Workload { config, processes })
}

fn parse_line(line: usize, raw: &str) -> LoadResult<Line> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Line::Skip);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    match fields.as_slice() {
        [key, value] => parse_setting(line, key, value),
        [id, arrival, burst, priority] => Ok(Line::Process(ProcessSpec::new(
            *id,
            number(line, "arrival", arrival)?,
            number(line, "burst", burst)?,
            number(line, "priority", priority)?,
        ))),
        other => Err(LoadError::MalformedLine {
            line,
            fields: other.len(),
        }),
    }
}

fn parse_setting(line: usize, key: &str, value: &str) -> LoadResult<Line> {
    let upper = key.to_ascii_uppercase();
    match upper.as_str() {
        "DEMOTE" => Ok(Line::Demote(number(line, "demote threshold", value)?)),
        "AGING" => Ok(Line::Aging(number(line, "aging threshold", value)?)),
        "PREEMPT" => Ok(Line::Preempt(flag(line, value)?)),
        _ => {
            let level = upper
                .strip_prefix('Q')
                .and_then(|digits| digits.parse::<usize>().ok())
                .ok_or_else(|| LoadError::UnknownSetting {
                    line,
                    key: key.to_string(),
                })?;
            Ok(Line::Quantum {
                level,
                ticks: number(line, "quantum", value)?,
            })
        }
    }
}

fn number<T: std::str::FromStr>(line: usize, field: &'static str, value: &str) -> LoadResult<T> {
    value.parse().map_err(|_| LoadError::InvalidValue {
        line,
        field,
        value: value.to_string(),
    })
}

fn flag(line: usize, value: &str) -> LoadResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(LoadError::InvalidValue {
            line,
            field: "preempt flag",
            value: value.to_string(),
        }),
    }
}

/// Set the quantum of `level`, padding new levels with the default quantum
fn set_quantum(config: &mut SchedulerConfig, level: usize, ticks: Tick) -> LoadResult<()> {
    let quantum = TimeQuantum::new(level, ticks)?;
    if level >= config.quanta.len() {
        let filler = TimeQuantum::new(level, DEFAULT_QUANTUM)?;
        config.quanta.resize(level + 1, filler);
    }
    config.quanta[level] = quantum;
    Ok(())
}
