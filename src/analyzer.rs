//! This module validates machine definitions before any run happens. A `Program` that passes
//! [`analyze`] satisfies every referential invariant the engine relies on: declared states,
//! symbols drawn from the tape alphabet, and unique transition keys.

use crate::types::{Program, TransitionKey};
use std::collections::HashSet;
use thiserror::Error;

/// Represents the ways a machine definition can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The blank symbol is missing from the tape alphabet.
    #[error("Blank symbol '{0}' is not in the tape alphabet")]
    BlankNotInTapeAlphabet(char),
    /// The initial state is not a declared state.
    #[error("Initial state '{0}' is not a declared state")]
    UndefinedInitialState(String),
    /// The accepting set is empty.
    #[error("No accepting states declared")]
    NoAcceptingStates,
    /// An accepting state is not a declared state.
    #[error("Accepting state '{0}' is not a declared state")]
    UndefinedAcceptingState(String),
    /// An input symbol is missing from the tape alphabet.
    #[error("Input symbol '{0}' is not in the tape alphabet")]
    InputSymbolNotInTapeAlphabet(char),
    /// A transition names a state that is not declared.
    #[error("Transition {transition} references undeclared state '{state}'")]
    UndefinedState {
        transition: TransitionKey,
        state: String,
    },
    /// A transition reads, writes or stores a symbol outside the tape alphabet.
    #[error("Transition {transition} references symbol '{symbol}' outside the tape alphabet")]
    UndefinedSymbol {
        transition: TransitionKey,
        symbol: char,
    },
    /// Two transitions share the same key.
    #[error("Duplicate transition for {0}")]
    DuplicateTransition(TransitionKey),
}

/// Validates a machine definition.
///
/// The checks run in a fixed order and the first violation is returned, so the same
/// malformed program always reports the same error.
///
/// # Returns
///
/// * `Ok(())` if the program satisfies every invariant.
/// * `Err(ConfigurationError)` describing the first violation found.
pub fn analyze(program: &Program) -> Result<(), ConfigurationError> {
    [
        check_blank,
        check_initial_state,
        check_accepting_states,
        check_input_alphabet,
        check_transition_references,
        check_duplicate_transitions,
    ]
    .iter()
    .try_for_each(|check| check(program))
}

/// Returns the declared states that no sequence of transitions reaches from the initial state.
///
/// Unreachable states are legal but usually a mistake, so the engine reports them as a warning
/// instead of refusing the program. The result is sorted.
pub fn unreachable_states(program: &Program) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut queue = vec![program.initial_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for transition in program
            .transitions
            .iter()
            .filter(|t| t.key.state == state)
        {
            let next = transition.action.next_state.as_str();
            if !visited.contains(next) {
                queue.push(next);
            }
        }
    }

    program
        .states
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .cloned()
        .collect()
}

fn check_blank(program: &Program) -> Result<(), ConfigurationError> {
    if !program.tape_alphabet.contains(&program.blank) {
        return Err(ConfigurationError::BlankNotInTapeAlphabet(program.blank));
    }

    Ok(())
}

fn check_initial_state(program: &Program) -> Result<(), ConfigurationError> {
    if !program.states.contains(&program.initial_state) {
        return Err(ConfigurationError::UndefinedInitialState(
            program.initial_state.clone(),
        ));
    }

    Ok(())
}

fn check_accepting_states(program: &Program) -> Result<(), ConfigurationError> {
    if program.accepting_states.is_empty() {
        return Err(ConfigurationError::NoAcceptingStates);
    }

    program
        .accepting_states
        .iter()
        .find(|state| !program.states.contains(*state))
        .map_or(Ok(()), |state| {
            Err(ConfigurationError::UndefinedAcceptingState(state.clone()))
        })
}

fn check_input_alphabet(program: &Program) -> Result<(), ConfigurationError> {
    program
        .input_alphabet
        .iter()
        .find(|symbol| !program.tape_alphabet.contains(*symbol))
        .map_or(Ok(()), |&symbol| {
            Err(ConfigurationError::InputSymbolNotInTapeAlphabet(symbol))
        })
}

/// Checks that every state and symbol mentioned by a transition is declared.
fn check_transition_references(program: &Program) -> Result<(), ConfigurationError> {
    for transition in &program.transitions {
        let (key, action) = (&transition.key, &transition.action);

        for state in [&key.state, &action.next_state] {
            if !program.states.contains(state) {
                return Err(ConfigurationError::UndefinedState {
                    transition: key.clone(),
                    state: state.clone(),
                });
            }
        }

        for symbol in [key.register, key.read, action.register, action.write] {
            if !program.tape_alphabet.contains(&symbol) {
                return Err(ConfigurationError::UndefinedSymbol {
                    transition: key.clone(),
                    symbol,
                });
            }
        }
    }

    Ok(())
}

fn check_duplicate_transitions(program: &Program) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();

    program
        .transitions
        .iter()
        .find(|transition| !seen.insert(&transition.key))
        .map_or(Ok(()), |transition| {
            Err(ConfigurationError::DuplicateTransition(
                transition.key.clone(),
            ))
        })
}
