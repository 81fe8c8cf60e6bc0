//! This module defines the `Tape`, an unbounded sequence of symbols with a single read/write
//! head. Cells are materialized lazily on either side as the head moves past the known extent.

use std::collections::VecDeque;
use std::fmt;

use crate::trace::Snapshot;
use crate::types::Direction;

/// A bi-infinite tape.
///
/// Materialized cells live in a `VecDeque`, so extending the tape on either end and moving
/// the head are both O(1) amortized. Positions are signed offsets from the origin, the cell
/// holding the first input symbol. Every position outside the materialized extent implicitly
/// holds the blank symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    /// Index of the origin cell in `cells`.
    origin: usize,
    /// Index of the head in `cells`.
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input` from offset 0 on, with the head at offset 0.
    ///
    /// An empty input yields a tape whose single cell holds the blank symbol.
    pub fn new(input: &str, blank: char) -> Self {
        Self::from_symbols(input.chars(), blank)
    }

    /// Creates a tape from any sequence of symbols. See [`Tape::new`].
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>, blank: char) -> Self {
        let mut cells: VecDeque<char> = symbols.into_iter().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }

        Self {
            cells,
            origin: 0,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Advances the head one cell, appending a blank cell if the head leaves the known extent.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head == self.cells.len() {
            self.cells.push_back(self.blank);
        }
    }

    /// Retreats the head one cell, prepending a blank cell if the head leaves the known extent.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            // The new cell takes index 0, so every existing index shifts by one.
            self.cells.push_front(self.blank);
            self.origin += 1;
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head according to `direction`.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Stay => {}
        }
    }

    /// Returns the head position as an offset from the origin.
    pub fn position(&self) -> isize {
        self.head as isize - self.origin as isize
    }

    /// Returns the offset of the leftmost materialized cell (zero or negative).
    pub fn leftmost(&self) -> isize {
        -(self.origin as isize)
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Iterates over the materialized cells in tape order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }

    /// Returns every materialized cell in tape order, blanks included.
    pub fn contents(&self) -> String {
        self.symbols().collect()
    }

    /// Returns the materialized cells with the surrounding blanks trimmed.
    ///
    /// This is the result a transforming machine leaves behind.
    pub fn output(&self) -> String {
        self.contents().trim_matches(self.blank).to_string()
    }

    /// Returns a read-only projection of the tape around the head.
    ///
    /// Both contexts are listed in tape order: the left context starts with the leftmost
    /// materialized cell, the right context with the cell next to the head.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            left: self.cells.range(..self.head).copied().collect(),
            current: self.read(),
            right: self.cells.range(self.head + 1..).copied().collect(),
        }
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
