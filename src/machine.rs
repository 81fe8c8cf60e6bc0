//! This module defines the `TuringMachine` struct, the validated and immutable form of a
//! `Program`, and `Execution`, the transient state of a single run. A machine can run any
//! number of inputs; every run gets a fresh tape, register and step counter.

use log::{debug, trace, warn};
use std::collections::HashMap;

use crate::analyzer::{analyze, unreachable_states, ConfigurationError};
use crate::tape::Tape;
use crate::trace::{TraceRecord, TraceSink};
use crate::types::{
    Action, InvalidInputError, Mode, Outcome, Program, Rejection, RunConfig, Step, TransitionKey,
};

/// A single-tape Turing Machine with an auxiliary register.
///
/// The transition table is keyed by `(state, register, symbol)` and never changes after
/// construction, so a machine can be shared between threads and runs freely.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    program: Program,
    rules: HashMap<TransitionKey, Action>,
    config: RunConfig,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a `Program` using the default [`RunConfig`].
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if the program passes validation.
    /// * `Err(ConfigurationError)` describing the first invariant the program violates.
    pub fn new(program: Program) -> Result<Self, ConfigurationError> {
        Self::with_config(program, RunConfig::default())
    }

    /// Creates a new `TuringMachine` from a `Program` with explicit run settings.
    pub fn with_config(program: Program, config: RunConfig) -> Result<Self, ConfigurationError> {
        analyze(&program)?;

        let unreachable = unreachable_states(&program);
        if !unreachable.is_empty() {
            warn!(
                "Program '{}' declares states unreachable from '{}': {:?}",
                program.name, program.initial_state, unreachable
            );
        }

        let rules = program
            .transitions
            .iter()
            .map(|t| (t.key.clone(), t.action.clone()))
            .collect();

        Ok(Self {
            program,
            rules,
            config,
        })
    }

    /// Returns the program this machine was built from.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the run settings.
    pub fn config(&self) -> RunConfig {
        self.config
    }

    /// Returns the blank symbol used by this Turing Machine.
    pub fn blank(&self) -> char {
        self.program.blank
    }

    /// Checks if `state` belongs to the accepting set.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.program.accepting_states.contains(state)
    }

    /// Finds the action for the given `(state, register, symbol)` triple.
    pub fn transition(&self, state: &str, register: char, symbol: char) -> Option<&Action> {
        self.rules.get(&TransitionKey::new(state, register, symbol))
    }

    /// Checks that every symbol of `input` belongs to the input alphabet.
    ///
    /// This is the check strict mode applies before a run. It is available in any mode.
    pub fn check_input(&self, input: &str) -> Result<(), InvalidInputError> {
        input
            .chars()
            .enumerate()
            .find(|(_, symbol)| !self.program.input_alphabet.contains(symbol))
            .map_or(Ok(()), |(position, symbol)| {
                Err(InvalidInputError { symbol, position })
            })
    }

    /// Starts a run on `input` that the caller advances with [`Execution::step`].
    pub fn start(&self, input: &str) -> Execution<'_> {
        Execution::new(self, input)
    }

    /// Runs the machine on `input` until it halts or exhausts the step budget.
    pub fn run(&self, input: &str) -> Outcome {
        self.start(input).run()
    }

    /// Runs the machine on `input`, handing a record of every applied transition to `sink`.
    ///
    /// The returned report keeps the final tape, which is where transforming machines leave
    /// their result.
    pub fn simulate(&self, input: &str, mut sink: impl TraceSink) -> Report {
        let mut execution = self.start(input);

        let outcome = loop {
            match execution.step() {
                Step::Continue => sink.record(execution.record()),
                Step::Halt(outcome) => break outcome,
            }
        };

        Report {
            outcome,
            steps: execution.step_count,
            tape: execution.tape,
        }
    }

    /// Runs the machine on `input` and collects the full trace.
    pub fn trace(&self, input: &str) -> (Outcome, Vec<TraceRecord>) {
        let mut records = Vec::new();
        let report = self.simulate(input, &mut records);
        (report.outcome, records)
    }
}

/// Everything a finished run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    /// The number of transitions applied.
    pub steps: usize,
    /// The tape as the machine left it.
    pub tape: Tape,
}

/// The run state of one input on one machine.
///
/// An execution is either running or halted. Once halted it never changes again, and every
/// further call to [`step`](Execution::step) reports the same outcome.
#[derive(Debug, Clone)]
pub struct Execution<'m> {
    machine: &'m TuringMachine,
    state: &'m str,
    register: char,
    tape: Tape,
    step_count: usize,
    outcome: Option<Outcome>,
}

impl<'m> Execution<'m> {
    fn new(machine: &'m TuringMachine, input: &str) -> Self {
        let blank = machine.blank();
        let mut execution = Self {
            machine,
            state: &machine.program.initial_state,
            register: blank,
            tape: Tape::new(input, blank),
            step_count: 0,
            outcome: None,
        };

        debug!(
            "Starting '{}' on input {:?} in state {}",
            machine.program.name, input, execution.state
        );

        if machine.config.mode == Mode::Strict {
            if let Err(error) = machine.check_input(input) {
                execution.halt(Outcome::Rejected(Rejection::InvalidInput(error)));
            }
        }

        execution
    }

    /// Executes a single step of the machine's computation.
    ///
    /// The accepting check and the step budget are evaluated before the transition lookup,
    /// so a run whose initial state is accepting halts without applying any transition.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(outcome)` if the run has terminated.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Halt(outcome.clone());
        }

        match self.apply() {
            Ok(()) => Step::Continue,
            Err(outcome) => {
                self.halt(outcome.clone());
                Step::Halt(outcome)
            }
        }
    }

    /// Steps until the run halts and returns the outcome.
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Step::Halt(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn apply(&mut self) -> Result<(), Outcome> {
        let machine = self.machine;

        if machine.is_accepting(self.state) {
            return Err(Outcome::Accepted(self.state.to_string()));
        }

        if self.step_count >= machine.config.max_steps {
            return Err(Outcome::Rejected(Rejection::StepBudgetExceeded(
                machine.config.max_steps,
            )));
        }

        let symbol = self.tape.read();
        let key = TransitionKey::new(self.state, self.register, symbol);
        let Some(action) = machine.rules.get(&key) else {
            return Err(Outcome::Rejected(Rejection::NoTransition(key)));
        };

        self.tape.write(action.write);
        self.tape.shift(action.direction);
        self.state = action.next_state.as_str();
        self.register = action.register;
        self.step_count += 1;

        trace!(
            "Step {}: {} -> ({}, {}, {}, {:?}), head at {}",
            self.step_count,
            key,
            action.next_state,
            action.register,
            action.write,
            action.direction,
            self.tape.position()
        );

        Ok(())
    }

    fn halt(&mut self, outcome: Outcome) {
        debug!(
            "Run of '{}' halted after {} steps: {}",
            self.machine.program.name, self.step_count, outcome
        );
        self.outcome = Some(outcome);
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        self.state
    }

    /// Returns the current register value.
    pub fn register(&self) -> char {
        self.register
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the outcome once the run has halted.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.outcome.is_some()
    }

    /// Captures the current configuration as a trace record.
    pub fn record(&self) -> TraceRecord {
        TraceRecord {
            step: self.step_count,
            state: self.state.to_string(),
            register: self.register,
            tape: self.tape.snapshot(),
        }
    }
}
