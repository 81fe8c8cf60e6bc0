use tmsim::{
    Direction, Outcome, Program, Rejection, RunConfig, Step, TransitionKey, TuringMachine,
    DEFAULT_MAX_STEPS,
};

fn unary_increment() -> Program {
    Program::new("Unary increment", "q0", '_')
        .states(["qf"])
        .input_alphabet("01")
        .tape_alphabet("01")
        .accepting(["qf"])
        .rule(("q0", '_', '1'), ("q0", '_', '1', Direction::Right))
        .rule(("q0", '_', '_'), ("qf", '_', '1', Direction::Right))
}

#[test]
fn unary_increment_accepts_and_appends() {
    let machine = TuringMachine::new(unary_increment()).unwrap();
    let mut records = Vec::new();

    let report = machine.simulate("11", &mut records);

    assert_eq!(report.outcome, Outcome::Accepted("qf".to_string()));
    assert_eq!(report.steps, 3);
    assert_eq!(report.tape.output(), "111");
    // One past the appended `1`.
    assert_eq!(report.tape.position(), 3);
    assert_eq!(report.tape.read(), '_');
    assert_eq!(records.len(), report.steps);
}

#[test]
fn missing_transition_rejects_with_triple() {
    let machine = TuringMachine::new(unary_increment()).unwrap();

    let outcome = machine.run("1a");

    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::NoTransition(TransitionKey::new("q0", '_', 'a')))
    );
    assert_eq!(outcome.to_string(), "rejected: no transition for (q0, _, a)");
}

#[test]
fn non_halting_machine_hits_step_budget() {
    let program = Program::new("Zero walker", "q0", '_')
        .states(["qf"])
        .input_alphabet("0")
        .tape_alphabet("0")
        .accepting(["qf"])
        .rule(("q0", '_', '0'), ("q0", '_', '0', Direction::Right))
        .rule(("q0", '_', '_'), ("q0", '_', '0', Direction::Right));
    let machine = TuringMachine::new(program).unwrap();

    let (outcome, trace) = machine.trace("0000");

    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::StepBudgetExceeded(DEFAULT_MAX_STEPS))
    );
    assert_eq!(trace.len(), DEFAULT_MAX_STEPS);
    assert_eq!(trace.last().map(|r| r.step), Some(DEFAULT_MAX_STEPS));
}

#[test]
fn register_selects_between_rules_with_same_state_and_symbol() {
    // `set` stores the first symbol in the register; `branch` then reads `0` under both
    // register values and must pick a different action for each.
    let program = Program::new("Register branch", "set", '_')
        .states(["branch", "saw_x", "saw_y"])
        .input_alphabet("xy0")
        .tape_alphabet("xy0AB")
        .accepting(["saw_x", "saw_y"])
        .rule(("set", '_', 'x'), ("branch", 'x', 'x', Direction::Right))
        .rule(("set", '_', 'y'), ("branch", 'y', 'y', Direction::Right))
        .rule(("branch", 'x', '0'), ("saw_x", '_', 'A', Direction::Stay))
        .rule(("branch", 'y', '0'), ("saw_y", '_', 'B', Direction::Left));
    let machine = TuringMachine::new(program).unwrap();

    let x = machine.simulate("x0", tmsim::NoTrace);
    assert_eq!(x.outcome, Outcome::Accepted("saw_x".to_string()));
    assert_eq!(x.tape.contents(), "xA");
    assert_eq!(x.tape.position(), 1);

    let y = machine.simulate("y0", tmsim::NoTrace);
    assert_eq!(y.outcome, Outcome::Accepted("saw_y".to_string()));
    assert_eq!(y.tape.contents(), "yB");
    assert_eq!(y.tape.position(), 0);
}

#[test]
fn runs_are_deterministic() {
    let machine = TuringMachine::new(unary_increment()).unwrap();

    for input in ["", "1", "111", "10", "1a"] {
        assert_eq!(machine.trace(input), machine.trace(input));
    }
}

#[test]
fn trace_steps_strictly_increase_from_one() {
    let machine = TuringMachine::new(unary_increment()).unwrap();
    let (_, trace) = machine.trace("1111");

    let steps: Vec<usize> = trace.iter().map(|r| r.step).collect();
    assert_eq!(steps, (1..=5).collect::<Vec<_>>());
}

#[test]
fn accepting_initial_state_halts_immediately() {
    let program = unary_increment().accepting(["q0"]);
    let machine = TuringMachine::new(program).unwrap();
    let mut execution = machine.start("111");

    assert_eq!(execution.step(), Step::Halt(Outcome::Accepted("q0".to_string())));
    assert_eq!(execution.step_count(), 0);
}

#[test]
fn empty_input_reads_blank_at_origin() {
    let machine = TuringMachine::new(unary_increment()).unwrap();
    let (outcome, trace) = machine.trace("");

    assert!(outcome.is_accepted());
    assert_eq!(trace.len(), 1);
    assert_eq!(trace[0].tape.left, vec!['1']);
    assert_eq!(trace[0].tape.current, '_');
}

#[test]
fn strict_mode_is_a_toggle() {
    let strict = TuringMachine::with_config(unary_increment(), RunConfig::strict()).unwrap();
    let normal = TuringMachine::new(unary_increment()).unwrap();

    assert!(matches!(
        strict.run("1a"),
        Outcome::Rejected(Rejection::InvalidInput(ref e)) if e.symbol == 'a' && e.position == 1
    ));
    assert!(matches!(
        normal.run("1a"),
        Outcome::Rejected(Rejection::NoTransition(_))
    ));
}
