//! Property-based tests for the point-buy allocation
//!
//! Tests invariants:
//! - Every ability stays within [MIN_STAT, MAX_STAT]
//! - The total never exceeds TOTAL_STAT_POINTS
//! - A step succeeds exactly when its guard said it could
//! - A refused step changes nothing
//! - Creation is enabled exactly when all points are spent and the name is
//!   non-blank

use proptest::prelude::*;

use crate::core::creation::{parse_inventory, CreationForm};
use crate::core::stats::{StatAllocation, StatKey, MAX_STAT, MIN_STAT, TOTAL_STAT_POINTS};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Step {
    Up(StatKey),
    Down(StatKey),
}

fn arb_stat_key() -> impl Strategy<Value = StatKey> {
    prop::sample::select(StatKey::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum FormEvent {
    Step(Step),
    Rename(String),
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,4}",
        "[ ]{0,2}[A-Za-z]{1,8}[ ]{0,2}",
    ]
}

fn arb_form_event() -> impl Strategy<Value = FormEvent> {
    prop_oneof![
        3 => arb_step().prop_map(FormEvent::Step),
        1 => arb_name().prop_map(FormEvent::Rename),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arb_stat_key().prop_map(Step::Up),
        arb_stat_key().prop_map(Step::Down),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_allocation_stays_in_bounds(steps in prop::collection::vec(arb_step(), 0..64)) {
        let mut alloc = StatAllocation::new();
        for step in steps {
            match step {
                Step::Up(key) => { alloc.increment(key); }
                Step::Down(key) => { alloc.decrement(key); }
            }
            for key in StatKey::ALL {
                let value = alloc.value(key);
                prop_assert!((MIN_STAT..=MAX_STAT).contains(&value));
            }
            prop_assert!(alloc.stats().total() <= TOTAL_STAT_POINTS);
            prop_assert!(alloc.remaining() >= 0);
        }
    }

    #[test]
    fn prop_step_matches_guard(
        steps in prop::collection::vec(arb_step(), 0..32),
        probe in arb_step(),
    ) {
        let mut alloc = StatAllocation::new();
        for step in steps {
            match step {
                Step::Up(key) => { alloc.increment(key); }
                Step::Down(key) => { alloc.decrement(key); }
            }
        }

        let before = alloc.clone();
        let (allowed, applied) = match probe {
            Step::Up(key) => (alloc.can_increment(key), alloc.increment(key)),
            Step::Down(key) => (alloc.can_decrement(key), alloc.decrement(key)),
        };
        prop_assert_eq!(allowed, applied);
        if !applied {
            prop_assert_eq!(alloc, before);
        }
    }

    #[test]
    fn prop_create_enabled_iff_spent_and_named(
        events in prop::collection::vec(arb_form_event(), 0..64),
    ) {
        let mut form = CreationForm::new();
        for event in events {
            match event {
                FormEvent::Step(Step::Up(key)) => { form.increment(key); }
                FormEvent::Step(Step::Down(key)) => { form.decrement(key); }
                FormEvent::Rename(name) => form.set_name(&name),
            }
            let expected =
                form.allocation().remaining() == 0 && !form.name().trim().is_empty();
            prop_assert_eq!(form.can_submit(), expected);
            prop_assert_eq!(form.validate().is_ok(), expected);
        }
    }

    #[test]
    fn prop_inventory_items_are_trimmed_and_nonempty(text in "[a-z ,]{0,80}") {
        for item in parse_inventory(&text) {
            prop_assert!(!item.is_empty());
            prop_assert_eq!(item.trim(), item.as_str());
            prop_assert!(!item.contains(','));
        }
    }
}
