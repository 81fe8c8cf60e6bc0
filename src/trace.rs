//! Trace records emitted once per applied transition, and the sink trait that receives them.

use serde::Serialize;
use std::fmt;

/// A read-only view of the tape around the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cells left of the head, leftmost first.
    pub left: Vec<char>,
    /// The cell under the head.
    pub current: char,
    /// Cells right of the head, nearest first.
    pub right: Vec<char>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |cells: &[char]| {
            cells
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        if !self.left.is_empty() {
            write!(f, "{} ", join(self.left.as_slice()))?;
        }
        write!(f, "[{}]", self.current)?;
        if !self.right.is_empty() {
            write!(f, " {}", join(self.right.as_slice()))?;
        }

        Ok(())
    }
}

/// The machine configuration right after a transition was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// 1-based index of the transition that produced this record.
    pub step: usize,
    pub state: String,
    pub register: char,
    pub tape: Snapshot,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}: ({}, {}) {}",
            self.step, self.state, self.register, self.tape
        )
    }
}

/// Receives trace records from a running machine.
pub trait TraceSink {
    fn record(&mut self, record: TraceRecord);
}

/// A sink that drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn record(&mut self, _record: TraceRecord) {}
}

impl TraceSink for Vec<TraceRecord> {
    fn record(&mut self, record: TraceRecord) {
        self.push(record);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, record: TraceRecord) {
        (**self).record(record);
    }
}
