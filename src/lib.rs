//! This crate provides the core logic for a register Turing Machine simulator.
//! It includes modules for validating machine definitions, the unbounded tape, the step-by-step
//! execution engine with its trace hook, and a catalog of reference machines.

pub mod analyzer;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `analyze` function and `ConfigurationError` enum from the analyzer module.
pub use analyzer::{analyze, ConfigurationError};
/// Re-exports the `TuringMachine`, `Execution` and `Report` structs from the machine module.
pub use machine::{Execution, Report, TuringMachine};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the trace record types and the `TraceSink` trait from the trace module.
pub use trace::{NoTrace, Snapshot, TraceRecord, TraceSink};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Action, Direction, InvalidInputError, Mode, Outcome, Program, Rejection, RunConfig, Step,
    Transition, TransitionKey, TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
