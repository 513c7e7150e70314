/*!
 * Ready-Queue Set
 * K FIFO queues of process handles, level 0 first
 */

use crate::core::types::QueueLevel;
use crate::process::ProcessHandle;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub(crate) struct ReadyQueues {
    levels: Vec<VecDeque<ProcessHandle>>,
}

impl ReadyQueues {
    pub fn new(levels: usize) -> Self {
        Self {
            levels: vec![VecDeque::new(); levels],
        }
    }

    /// Append at the tail of `level`
    #[inline]
    pub fn push_back(&mut self, level: QueueLevel, handle: ProcessHandle) {
        self.levels[level.index()].push_back(handle);
    }

    /// Pop the head of the highest-priority non-empty queue
    pub fn pop_next(&mut self) -> Option<(QueueLevel, ProcessHandle)> {
        self.levels
            .iter_mut()
            .enumerate()
            .find_map(|(index, queue)| queue.pop_front().map(|h| (QueueLevel::new(index), h)))
    }

    /// Remove every handle of `level` matching `predicate`, keeping FIFO order
    /// among both the removed and the remaining handles
    pub fn extract_if<F>(&mut self, level: QueueLevel, mut predicate: F) -> Vec<ProcessHandle>
    where
        F: FnMut(ProcessHandle) -> bool,
    {
        let queue = &mut self.levels[level.index()];
        let mut extracted = Vec::new();
        queue.retain(|&handle| {
            if predicate(handle) {
                extracted.push(handle);
                false
            } else {
                true
            }
        });
        extracted
    }

    pub fn level(&self, level: QueueLevel) -> impl Iterator<Item = ProcessHandle> + '_ {
        self.levels[level.index()].iter().copied()
    }

    /// Every enqueued handle, level by level
    pub fn iter(&self) -> impl Iterator<Item = ProcessHandle> + '_ {
        self.levels.iter().flat_map(|queue| queue.iter().copied())
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(VecDeque::is_empty)
    }
}
