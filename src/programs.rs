//! A catalog of reference machines: a unary successor, a palindrome recognizer that keeps the
//! erased symbol in the register, and a transformer that shifts its input one cell right.

use crate::machine::TuringMachine;
use crate::types::{Direction, Program, TuringMachineError};

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        unary_increment(),
        palindrome_recognizer(),
        shift_right(),
    ];
}

/// Appends a `1` to a unary number.
fn unary_increment() -> Program {
    Program::new("Unary increment", "q0", '_')
        .states(["qf"])
        .input_alphabet("1")
        .tape_alphabet("01")
        .accepting(["qf"])
        .rule(("q0", '_', '1'), ("q0", '_', '1', Direction::Right))
        .rule(("q0", '_', '_'), ("qf", '_', '1', Direction::Right))
}

/// Accepts palindromes over `{a, b}`.
///
/// Each round erases the leftmost symbol into the register, walks to the right end and
/// compares the rightmost symbol against the register. A mismatch finds no transition.
fn palindrome_recognizer() -> Program {
    let mut program = Program::new("Palindrome recognizer", "first", '_')
        .states(["seek_end", "check_last", "rewind", "accept"])
        .input_alphabet("ab")
        .tape_alphabet("ab")
        .accepting(["accept"])
        .rule(("first", '_', '_'), ("accept", '_', '_', Direction::Stay))
        .rule(("rewind", '_', '_'), ("first", '_', '_', Direction::Right));

    for remembered in ['a', 'b'] {
        program = program
            .rule(
                ("first", '_', remembered),
                ("seek_end", remembered, '_', Direction::Right),
            )
            .rule(
                ("seek_end", remembered, '_'),
                ("check_last", remembered, '_', Direction::Left),
            )
            .rule(
                ("check_last", remembered, remembered),
                ("rewind", '_', '_', Direction::Left),
            )
            // Odd length: the middle symbol was the last one left.
            .rule(
                ("check_last", remembered, '_'),
                ("accept", '_', '_', Direction::Stay),
            )
            .rule(("rewind", '_', remembered), ("rewind", '_', remembered, Direction::Left));

        for symbol in ['a', 'b'] {
            program = program.rule(
                ("seek_end", remembered, symbol),
                ("seek_end", remembered, symbol, Direction::Right),
            );
        }
    }

    program
}

/// Shifts a binary string one cell to the right, leaving a blank at the origin.
///
/// The register carries the symbol read on the previous step, which is written one cell
/// further right.
fn shift_right() -> Program {
    let mut program = Program::new("Shift right", "carry", '_')
        .states(["done"])
        .input_alphabet("01")
        .tape_alphabet("01")
        .accepting(["done"])
        .rule(("carry", '_', '_'), ("done", '_', '_', Direction::Stay));

    for carried in ['_', '0', '1'] {
        for symbol in ['0', '1'] {
            program = program.rule(
                ("carry", carried, symbol),
                ("carry", symbol, carried, Direction::Right),
            );
        }

        if carried != '_' {
            program = program.rule(
                ("carry", carried, '_'),
                ("done", '_', carried, Direction::Stay),
            );
        }
    }

    program
}

/// Read-only access to the built-in catalog.
pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .get(index)
            .cloned()
            .ok_or(TuringMachineError::IndexOutOfRange(index))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(name.to_string()))
    }

    /// Build a validated machine from the program with the given name
    pub fn machine(name: &str) -> Result<TuringMachine, TuringMachineError> {
        let program = Self::get_program_by_name(name)?;
        Ok(TuringMachine::new(program)?)
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.clone(),
            accepting_states: program.accepting_states.iter().cloned().collect(),
            state_count: program.states.len(),
            transition_count: program.transitions.len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub accepting_states: Vec<String>,
    pub state_count: usize,
    pub transition_count: usize,
}
