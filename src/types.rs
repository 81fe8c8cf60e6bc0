//! This module defines the core data structures shared by the simulator: machine definitions,
//! transition keys and actions, run configuration, run outcomes, and the crate-level error type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::analyzer::ConfigurationError;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The default maximum number of transitions applied in a single run.
pub const DEFAULT_MAX_STEPS: usize = 500;

/// A declarative Turing Machine definition.
///
/// A program is plain data. It is validated once when a [`TuringMachine`](crate::TuringMachine)
/// is built from it, and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    /// A human-readable name for the machine.
    #[serde(default)]
    pub name: String,
    /// The finite set of states.
    pub states: BTreeSet<String>,
    /// The symbols an input string may contain.
    pub input_alphabet: BTreeSet<char>,
    /// Every symbol that may appear on the tape, including the blank.
    pub tape_alphabet: BTreeSet<char>,
    /// The state every run starts in.
    pub initial_state: String,
    /// Reaching any of these states halts the run with an acceptance.
    pub accepting_states: BTreeSet<String>,
    /// The symbol of every cell that has not been written.
    #[serde(default = "default_blank")]
    pub blank: char,
    /// The transition relation, one entry per `(state, register, read)` key.
    pub transitions: Vec<Transition>,
}

fn default_blank() -> char {
    DEFAULT_BLANK_SYMBOL
}

impl Program {
    /// Creates an empty program with the given name, initial state and blank symbol.
    ///
    /// The initial state is declared, and the blank symbol is added to the tape alphabet.
    /// Everything else is filled in through the builder methods below.
    pub fn new(name: &str, initial_state: &str, blank: char) -> Self {
        Self {
            name: name.to_string(),
            states: BTreeSet::from([initial_state.to_string()]),
            input_alphabet: BTreeSet::new(),
            tape_alphabet: BTreeSet::from([blank]),
            initial_state: initial_state.to_string(),
            accepting_states: BTreeSet::new(),
            blank,
            transitions: Vec::new(),
        }
    }

    /// Declares additional states.
    pub fn states<'a>(mut self, states: impl IntoIterator<Item = &'a str>) -> Self {
        self.states.extend(states.into_iter().map(String::from));
        self
    }

    /// Declares the input alphabet, one symbol per character of `symbols`.
    pub fn input_alphabet(mut self, symbols: &str) -> Self {
        self.input_alphabet.extend(symbols.chars());
        self
    }

    /// Declares the tape alphabet, one symbol per character of `symbols`.
    pub fn tape_alphabet(mut self, symbols: &str) -> Self {
        self.tape_alphabet.extend(symbols.chars());
        self
    }

    /// Marks states as accepting.
    pub fn accepting<'a>(mut self, states: impl IntoIterator<Item = &'a str>) -> Self {
        self.accepting_states
            .extend(states.into_iter().map(String::from));
        self
    }

    /// Appends a transition rule.
    pub fn rule(mut self, key: impl Into<TransitionKey>, action: impl Into<Action>) -> Self {
        self.transitions.push(Transition {
            key: key.into(),
            action: action.into(),
        });
        self
    }
}

/// The lookup key of a transition: the current state, the register value, and the symbol
/// under the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionKey {
    pub state: String,
    pub register: char,
    pub read: char,
}

impl TransitionKey {
    pub fn new(state: &str, register: char, read: char) -> Self {
        Self {
            state: state.to_string(),
            register,
            read,
        }
    }
}

impl From<(&str, char, char)> for TransitionKey {
    fn from((state, register, read): (&str, char, char)) -> Self {
        Self::new(state, register, read)
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.state, self.register, self.read)
    }
}

/// What the machine does once a [`TransitionKey`] matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The state the machine transitions to.
    pub next_state: String,
    /// The new register value.
    pub register: char,
    /// The symbol written under the head before it moves.
    pub write: char,
    /// The head movement applied after writing.
    pub direction: Direction,
}

impl Action {
    pub fn new(next_state: &str, register: char, write: char, direction: Direction) -> Self {
        Self {
            next_state: next_state.to_string(),
            register,
            write,
            direction,
        }
    }
}

impl From<(&str, char, char, Direction)> for Action {
    fn from((next_state, register, write, direction): (&str, char, char, Direction)) -> Self {
        Self::new(next_state, register, write, direction)
    }
}

/// A single transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub key: TransitionKey,
    pub action: Action,
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// Input checking mode of the simulator.
///
/// - `Normal` (default): input strings are written to the tape as given. Symbols outside the
///   input alphabet simply find no transition.
/// - `Strict`: every input symbol must belong to the input alphabet, otherwise the run is
///   rejected before the first step.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    /// Input strings are not checked.
    #[default]
    Normal,
    /// Input strings are checked against the input alphabet.
    Strict,
}

/// Per-machine run settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub mode: Mode,
    /// The step budget. A run that applies this many transitions without accepting is rejected.
    pub max_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl RunConfig {
    /// Default settings with strict input checking enabled.
    pub fn strict() -> Self {
        Self::default().with_mode(Mode::Strict)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A transition was applied and the run continues.
    Continue,
    /// The run has terminated. Stepping again yields the same outcome.
    Halt(Outcome),
}

/// The terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The run reached the contained accepting state.
    Accepted(String),
    /// The run halted without accepting.
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Returns the rejection reason, if the run was rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(rejection) => Some(rejection),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted(state) => write!(f, "accepted in state {state}"),
            Outcome::Rejected(rejection) => write!(f, "rejected: {rejection}"),
        }
    }
}

/// Why a run halted without accepting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// No rule matches the current `(state, register, symbol)` triple.
    NoTransition(TransitionKey),
    /// The run applied the contained number of transitions without accepting.
    StepBudgetExceeded(usize),
    /// Strict mode found a symbol outside the input alphabet.
    InvalidInput(InvalidInputError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoTransition(key) => write!(f, "no transition for {key}"),
            Rejection::StepBudgetExceeded(limit) => {
                write!(f, "step budget exceeded ({limit} steps)")
            }
            Rejection::InvalidInput(error) => write!(f, "{error}"),
        }
    }
}

/// An input string contains a symbol outside the input alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid input symbol '{symbol}' at position {position}")]
pub struct InvalidInputError {
    pub symbol: char,
    pub position: usize,
}

/// Represents various errors that can occur while building or looking up machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The machine definition violates one of the structural invariants.
    #[error("Invalid machine configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// No catalog program has the given name.
    #[error("Program '{0}' not found")]
    ProgramNotFound(String),
    /// A catalog index past the end of the catalog.
    #[error("Program index {0} out of range")]
    IndexOutOfRange(usize),
}
