//! Property-based tests for the turn state machine
//!
//! Tests invariants:
//! - Action input and roll control are never both enabled
//! - No new request starts while one is in flight
//! - A failed roll always offers the same stat again

use proptest::prelude::*;

use crate::core::turn::{PendingRoll, TurnMachine, TurnPhase};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Input {
    Submit(String),
    TurnOk(Option<String>),
    TurnErr,
    StartRoll,
    RollOk(Option<String>),
    RollErr,
}

fn arb_stat() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "strength".to_string(),
        "agility".to_string(),
        "senses".to_string(),
    ]))
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Input::Submit),
        arb_stat().prop_map(Input::TurnOk),
        Just(Input::TurnErr),
        Just(Input::StartRoll),
        arb_stat().prop_map(Input::RollOk),
        Just(Input::RollErr),
    ]
}

fn roll(stat: Option<String>) -> Option<PendingRoll> {
    stat.map(|s| PendingRoll::new(&s, None))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_controls_mutually_exclusive(inputs in prop::collection::vec(arb_input(), 0..48)) {
        let mut machine = TurnMachine::new();
        for input in inputs {
            let was_in_flight = machine.in_flight();
            let started = match input {
                Input::Submit(text) => machine.submit_action(&text).is_some(),
                Input::StartRoll => machine.start_roll().is_some(),
                Input::TurnOk(stat) => { machine.turn_succeeded(roll(stat)); false }
                Input::TurnErr => { machine.turn_failed(); false }
                Input::RollOk(stat) => { machine.roll_succeeded(roll(stat)); false }
                Input::RollErr => { machine.roll_failed(); false }
            };

            prop_assert!(!(machine.action_enabled() && machine.roll_enabled()));
            if was_in_flight {
                prop_assert!(!started);
            }
            if machine.in_flight() {
                prop_assert!(!machine.action_enabled());
                prop_assert!(!machine.roll_enabled());
            }
        }
    }

    #[test]
    fn prop_failed_roll_keeps_stat(stat in "[a-z]{1,10}", retries in 1usize..5) {
        let mut machine = TurnMachine::new();
        machine.submit_action("go");
        machine.turn_succeeded(Some(PendingRoll::new(&stat, None)));
        for _ in 0..retries {
            prop_assert!(machine.start_roll().is_some());
            prop_assert!(machine.roll_failed());
            match machine.phase() {
                TurnPhase::AwaitingRoll(pending) => prop_assert_eq!(&pending.stat, &stat),
                other => prop_assert!(false, "unexpected phase {:?}", other),
            }
        }
    }
}
