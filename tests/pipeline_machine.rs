//! Scenario tests for a linear pipeline: Start -> Middle -> Finish.

use statewright::core::Message;
use statewright::{
    message_enum, state_enum, EventHooks, HookKind, MachineBuilder, MachineStatus,
    OperationError, Policy, SetupError, StateMachine,
};
use std::sync::{Arc, Mutex};

state_enum! {
    enum PipelineStep {
        Start,
        Middle,
        Finish,
        Aborted,
    }
}

message_enum! {
    enum Operation {
        First,
        Second,
    }
}

fn pipeline(policy: Policy) -> StateMachine<PipelineStep, Operation> {
    pipeline_with_hooks(policy, EventHooks::new())
}

fn pipeline_with_hooks(
    policy: Policy,
    hooks: EventHooks<PipelineStep, Operation>,
) -> StateMachine<PipelineStep, Operation> {
    MachineBuilder::with_config(policy, hooks)
        .starting_state(PipelineStep::Start)
        .and_then(|b| b.state(PipelineStep::Middle))
        .and_then(|b| b.final_state(PipelineStep::Finish))
        .and_then(|b| b.transition(PipelineStep::Start, Operation::First, PipelineStep::Middle))
        .and_then(|b| b.transition(PipelineStep::Middle, Operation::Second, PipelineStep::Finish))
        .expect("pipeline configuration is valid")
        .build()
}

#[test]
fn reaches_final_state() {
    let mut machine = pipeline(Policy::default());

    machine.dispatch(&Operation::First).unwrap();
    assert!(!machine.is_finished());

    machine.dispatch(&Operation::Second).unwrap();
    assert!(machine.is_finished());
    assert_eq!(machine.status(), MachineStatus::Finished);
    assert_eq!(machine.current_state(), Some(&PipelineStep::Finish));
}

#[test]
fn finish_policy_controls_error() {
    let mut lenient = pipeline(Policy::default());
    let mut strict = pipeline(
        Policy::lenient().with_reject_dispatch_when_finished(true),
    );

    for machine in [&mut lenient, &mut strict] {
        machine.dispatch(&Operation::First).unwrap();
        machine.dispatch(&Operation::Second).unwrap();
    }

    assert!(lenient.dispatch(&Operation::Second).is_ok());
    assert!(matches!(
        strict.dispatch(&Operation::Second),
        Err(OperationError::MachineFinished { .. })
    ));
    assert_eq!(lenient.current_state(), Some(&PipelineStep::Finish));
    assert_eq!(strict.current_state(), Some(&PipelineStep::Finish));
}

#[test]
fn final_hook_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (leaving, entering, finishing, transition) = (
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
    );
    let hooks = EventHooks::new()
        .on_leaving_state(move |s: &PipelineStep| {
            leaving.lock().unwrap().push(format!("leaving {s:?}"));
            Ok(())
        })
        .on_entering_state(move |s: &PipelineStep| {
            entering.lock().unwrap().push(format!("entering {s:?}"));
            Ok(())
        })
        .on_entering_final_state(move |s: &PipelineStep| {
            finishing.lock().unwrap().push(format!("final {s:?}"));
            Ok(())
        })
        .on_transition(move |m: &Operation, s: &PipelineStep| {
            transition.lock().unwrap().push(format!("transition {m:?} {s:?}"));
            Ok(())
        });
    let mut machine = pipeline_with_hooks(Policy::default(), hooks);

    machine.dispatch(&Operation::First).unwrap();
    machine.dispatch(&Operation::Second).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "leaving Start",
            "entering Middle",
            "transition First Middle",
            "leaving Middle",
            "entering Finish",
            "final Finish",
            "transition Second Finish",
        ]
    );
}

#[test]
fn final_states_are_absorbing_at_setup() {
    let result = pipeline(Policy::lenient())
        .to_builder()
        .transition(PipelineStep::Finish, Operation::First, PipelineStep::Start);

    assert!(matches!(
        result,
        Err(SetupError::TransitionFromFinalState { ref state }) if state == "Finish"
    ));
}

#[test]
fn derived_machine_continues_from_source_state() {
    let mut source = pipeline(Policy::default());
    source.dispatch(&Operation::First).unwrap();

    let mut derived = source
        .to_builder()
        .final_state(PipelineStep::Aborted)
        .unwrap()
        .transition(PipelineStep::Middle, Operation::First, PipelineStep::Aborted)
        .unwrap()
        .build();

    derived.dispatch(&Operation::First).unwrap();

    assert_eq!(derived.current_state(), Some(&PipelineStep::Aborted));
    assert!(derived.is_finished());
    assert_eq!(source.current_state(), Some(&PipelineStep::Middle));
    assert!(!source.is_finished());
}

#[test]
fn derived_machine_shares_hooks() {
    let finished = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&finished);
    let hooks = EventHooks::new().on_entering_final_state(move |s: &PipelineStep| {
        sink.lock().unwrap().push(*s);
        Ok(())
    });
    let source = pipeline_with_hooks(Policy::default(), hooks);

    let mut first = source.to_builder().build();
    let mut second = source.to_builder().build();
    for machine in [&mut first, &mut second] {
        machine.dispatch(&Operation::First).unwrap();
        machine.dispatch(&Operation::Second).unwrap();
    }

    assert_eq!(
        *finished.lock().unwrap(),
        vec![PipelineStep::Finish, PipelineStep::Finish]
    );
    assert_eq!(source.current_state(), Some(&PipelineStep::Start));
}

#[test]
fn failing_transition_hook_commits_before_notify() {
    let hooks = EventHooks::new()
        .on_transition(|_: &Operation, _: &PipelineStep| Err("subscriber unavailable".into()));
    let mut machine = pipeline_with_hooks(Policy::default(), hooks);

    let err = machine.dispatch(&Operation::First).unwrap_err();

    assert!(matches!(
        err,
        OperationError::Hook {
            hook: HookKind::Transition,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Hook on_transition failed: subscriber unavailable"
    );
    assert_eq!(machine.current_state(), Some(&PipelineStep::Middle));
}

/// Review messages carry a verdict; the target depends on it.
#[derive(Debug)]
enum Review {
    Verdict { approved: bool },
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ReviewKind {
    Verdict,
    Empty,
}

impl Message for Review {
    type Kind = ReviewKind;

    fn kind(&self) -> ReviewKind {
        match self {
            Self::Verdict { .. } => ReviewKind::Verdict,
            Self::Empty => ReviewKind::Empty,
        }
    }

    fn is_valid(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

fn review_machine() -> StateMachine<PipelineStep, Review> {
    MachineBuilder::<PipelineStep, Review>::new()
        .starting_state(PipelineStep::Start)
        .and_then(|b| b.final_state(PipelineStep::Finish))
        .and_then(|b| b.final_state(PipelineStep::Aborted))
        .and_then(|b| {
            b.transition_with(PipelineStep::Start, ReviewKind::Verdict, |_, review| match review {
                Review::Verdict { approved: true } => PipelineStep::Finish,
                _ => PipelineStep::Aborted,
            })
        })
        .expect("review configuration is valid")
        .build()
}

#[test]
fn payload_selects_target() {
    let mut approved = review_machine();
    let mut rejected = review_machine();

    approved.dispatch(&Review::Verdict { approved: true }).unwrap();
    rejected.dispatch(&Review::Verdict { approved: false }).unwrap();

    assert_eq!(approved.current_state(), Some(&PipelineStep::Finish));
    assert_eq!(rejected.current_state(), Some(&PipelineStep::Aborted));
    assert!(approved.is_finished() && rejected.is_finished());
}

#[test]
fn invalid_message_is_rejected_first() {
    let mut unstarted = StateMachine::<PipelineStep, Review>::new();
    let mut started = review_machine();

    assert!(matches!(
        unstarted.dispatch(&Review::Empty),
        Err(OperationError::InvalidMessage { .. })
    ));
    assert!(matches!(
        started.dispatch(&Review::Empty),
        Err(OperationError::InvalidMessage { ref kind }) if kind == "Empty"
    ));
    assert_eq!(started.current_state(), Some(&PipelineStep::Start));
}

#[test]
fn setup_and_dispatch_share_one_error_type() -> statewright::Result<()> {
    let mut machine = MachineBuilder::<PipelineStep, Operation>::new()
        .starting_state(PipelineStep::Start)?
        .final_state(PipelineStep::Finish)?
        .transition(PipelineStep::Start, Operation::Second, PipelineStep::Finish)?
        .build();

    machine.dispatch(&Operation::First)?;
    machine.dispatch(&Operation::Second)?;

    assert!(machine.is_finished());
    Ok(())
}
