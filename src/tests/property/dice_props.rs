//! Property-based tests for the dice animation
//!
//! Tests invariants:
//! - Faces are always within 1..=6 while rolling
//! - Redraw count never exceeds elapsed time / frame interval
//! - A stopped animation never redraws

use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::dice::{DiceAnimation, DiceDisplay, FRAME_INTERVAL};

proptest! {
    #[test]
    fn prop_faces_in_range(seed in any::<u64>(), steps in prop::collection::vec(0u64..400, 1..64)) {
        let mut anim = DiceAnimation::new(StdRng::seed_from_u64(seed));
        anim.start();
        for ms in steps {
            anim.advance(Duration::from_millis(ms));
            match anim.frame() {
                Some(DiceDisplay::Rolling(a, b)) => {
                    prop_assert!((1..=6).contains(&a));
                    prop_assert!((1..=6).contains(&b));
                }
                other => prop_assert!(false, "unexpected frame {:?}", other),
            }
        }
    }

    #[test]
    fn prop_redraws_paced(seed in any::<u64>(), steps in prop::collection::vec(0u64..250, 1..64)) {
        let mut anim = DiceAnimation::new(StdRng::seed_from_u64(seed));
        anim.start();
        let total: u64 = steps.iter().sum();
        let redraws = steps
            .into_iter()
            .filter(|&ms| anim.advance(Duration::from_millis(ms)))
            .count() as u128;
        prop_assert!(redraws <= u128::from(total) / FRAME_INTERVAL.as_millis());
    }

    #[test]
    fn prop_stopped_never_redraws(seed in any::<u64>(), ms in 0u64..10_000) {
        let mut anim = DiceAnimation::new(StdRng::seed_from_u64(seed));
        anim.start();
        anim.stop();
        prop_assert!(!anim.advance(Duration::from_millis(ms)));
        prop_assert!(anim.frame().is_none());
    }
}
