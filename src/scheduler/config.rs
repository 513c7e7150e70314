/*!
 * Scheduler Configuration
 * Per-queue quanta and feedback thresholds
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::{QueueLevel, Tick, MAX_QUEUE_LEVELS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_QUANTUM: Tick = 3;
pub const DEFAULT_LEVELS: usize = 4;
pub const DEFAULT_DEMOTE_THRESHOLD: Tick = 6;
pub const DEFAULT_AGING_THRESHOLD: Tick = 5;

/// Time quantum of one ready queue, in ticks (always ≥ 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Create a quantum for queue `level`
    pub fn new(level: usize, ticks: Tick) -> ConfigResult<Self> {
        if ticks == 0 {
            return Err(ConfigError::InvalidQuantum {
                level,
                value: ticks,
            });
        }
        Ok(Self(ticks))
    }

    #[inline(always)]
    pub const fn ticks(self) -> Tick {
        self.0
    }
}

impl Serialize for TimeQuantum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Tick::deserialize(deserializer)?;
        if ticks == 0 {
            return Err(serde::de::Error::custom("time quantum must be at least 1 tick"));
        }
        Ok(Self(ticks))
    }
}

/// MLFQ parameters
///
/// `demote_threshold` and `aging_threshold` are disabled when 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    pub quanta: Vec<TimeQuantum>,
    #[serde(default)]
    pub demote_threshold: Tick,
    #[serde(default)]
    pub aging_threshold: Tick,
    #[serde(default = "default_preempt")]
    pub preempt_on_arrival: bool,
}

fn default_preempt() -> bool {
    true
}

impl SchedulerConfig {
    /// Build a configuration from raw per-queue quanta, with demotion, aging and
    /// preemption disabled
    pub fn new<I>(quanta: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = Tick>,
    {
        let quanta = quanta
            .into_iter()
            .enumerate()
            .map(|(level, ticks)| TimeQuantum::new(level, ticks))
            .collect::<ConfigResult<Vec<_>>>()?;

        let config = Self {
            quanta,
            demote_threshold: 0,
            aging_threshold: 0,
            preempt_on_arrival: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Single-queue round-robin
    pub fn round_robin(quantum: Tick) -> ConfigResult<Self> {
        Self::new([quantum])
    }

    pub fn with_quanta<I>(self, quanta: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = Tick>,
    {
        let replaced = Self::new(quanta)?;
        Ok(Self {
            quanta: replaced.quanta,
            ..self
        })
    }

    pub fn with_demote_threshold(mut self, ticks: Tick) -> Self {
        self.demote_threshold = ticks;
        self
    }

    pub fn with_aging_threshold(mut self, ticks: Tick) -> Self {
        self.aging_threshold = ticks;
        self
    }

    pub fn with_preemption(mut self, enabled: bool) -> Self {
        self.preempt_on_arrival = enabled;
        self
    }

    /// Validate queue count and quanta
    pub fn validate(&self) -> ConfigResult<()> {
        if self.quanta.is_empty() {
            return Err(ConfigError::NoQueues);
        }
        if self.quanta.len() > MAX_QUEUE_LEVELS {
            return Err(ConfigError::TooManyQueues {
                levels: self.quanta.len(),
                max: MAX_QUEUE_LEVELS,
            });
        }
        Ok(())
    }

    /// Number of ready queues (K)
    #[inline(always)]
    pub fn levels(&self) -> usize {
        self.quanta.len()
    }

    #[inline]
    pub fn quantum(&self, level: QueueLevel) -> Tick {
        self.quanta[level.index()].ticks()
    }

    #[inline(always)]
    pub const fn demotion_enabled(&self) -> bool {
        self.demote_threshold > 0
    }

    #[inline(always)]
    pub const fn aging_enabled(&self) -> bool {
        self.aging_threshold > 0
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quanta: vec![TimeQuantum(DEFAULT_QUANTUM); DEFAULT_LEVELS],
            demote_threshold: DEFAULT_DEMOTE_THRESHOLD,
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            preempt_on_arrival: true,
        }
    }
}
