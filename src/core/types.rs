/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::borrow::Borrow;
use std::fmt;

/// Simulation time, in ticks since the start of the run
pub type Tick = u64;

/// Upper bound on the number of ready queues (priorities are `u8`, 1-based)
pub const MAX_QUEUE_LEVELS: usize = u8::MAX as usize;

/// Stable, user-facing process identifier
///
/// Identifiers such as `P1` or `worker-03` fit inline (≤23 bytes) without a heap
/// allocation, which keeps timeline slices and snapshots cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ProcessId {
    inner: SmartString,
}

impl ProcessId {
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl From<&str> for ProcessId {
    #[inline]
    fn from(s: &str) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<String> for ProcessId {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl AsRef<str> for ProcessId {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Lets id-keyed maps be queried with a plain &str
impl Borrow<str> for ProcessId {
    #[inline(always)]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing priority (1 = highest)
///
/// Never used as a queue index directly; convert with [`Priority::initial_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);

    #[inline(always)]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this priority names one of `levels` queues
    #[inline]
    pub const fn fits(self, levels: usize) -> bool {
        self.0 >= 1 && (self.0 as usize) <= levels
    }

    /// Queue a process with this priority starts in: `clamp(priority - 1, 0, levels - 1)`
    #[inline]
    pub fn initial_level(self, levels: usize) -> QueueLevel {
        let index = (self.0 as usize).saturating_sub(1);
        QueueLevel(index.min(levels.saturating_sub(1)))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal ready-queue index (0 = highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueLevel(usize);

impl QueueLevel {
    pub const TOP: QueueLevel = QueueLevel(0);

    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }

    #[inline(always)]
    pub const fn is_top(self) -> bool {
        self.0 == 0
    }

    /// One level up (towards 0), or `None` at the top
    #[inline]
    pub const fn raised(self) -> Option<QueueLevel> {
        match self.0 {
            0 => None,
            n => Some(QueueLevel(n - 1)),
        }
    }

    /// One level down, or `None` when already at the bottom of `levels` queues
    #[inline]
    pub const fn lowered(self, levels: usize) -> Option<QueueLevel> {
        if self.0 + 1 < levels {
            Some(QueueLevel(self.0 + 1))
        } else {
            None
        }
    }

    /// Priority label matching this level
    #[inline]
    pub const fn as_priority(self) -> Priority {
        Priority((self.0 + 1) as u8)
    }
}

impl fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}
