//! Player-facing game journal
//!
//! Every notable change is recorded here with the turn it happened on, and
//! mirrored to the `log` facade for diagnostics.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of journal lines kept before the oldest are dropped
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// One journal line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub message: String,
}

impl LogEntry {
    /// Banner lines (`--- ...`) and multi-line messages are shown verbatim
    pub fn is_banner(&self) -> bool {
        self.message.starts_with("---") || self.message.contains('\n')
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_banner() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "Turn {}: {}", self.turn, self.message)
        }
    }
}

/// Bounded, turn-stamped message log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl Default for GameLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }
}

impl GameLog {
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a message for the given turn
    pub fn push(&mut self, turn: u32, message: impl Into<String>) {
        let entry = LogEntry {
            turn,
            message: message.into(),
        };
        log::info!("{entry}");
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// True if any kept entry contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
