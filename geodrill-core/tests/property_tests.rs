//! Property tests for the color scale and navigation stack.
//!
//! Uses proptest to verify:
//! 1. Scale range always contains zero and at least [0, 1]
//! 2. Every in-range value maps into the gradient
//! 3. The navigation stack never empties and never repeats its top

use proptest::prelude::*;
use geodrill_core::scale::{ColorScale, NO_DATA_COLOR};
use geodrill_core::{NavigationStack, RegionKey};

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6_f64, 0..32)
}

fn arb_key() -> impl Strategy<Value = RegionKey> {
    prop::sample::select(RegionKey::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Op {
    Push(RegionKey),
    Pop,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![arb_key().prop_map(Op::Push), Just(Op::Pop)]
}

proptest! {
    #[test]
    fn scale_contains_zero_and_unit(values in arb_values()) {
        let scale = ColorScale::from_values(&values);
        prop_assert!(scale.min <= 0.0);
        prop_assert!(0.0 <= scale.max);
        prop_assert!(scale.max >= 1.0);
        prop_assert!(scale.min < scale.max);
        for v in &values {
            prop_assert!(scale.min <= *v && *v <= scale.max);
        }
    }

    #[test]
    fn data_values_are_colored(values in prop::collection::vec(0.0..1.0e4_f64, 1..16)) {
        let scale = ColorScale::from_values(&values);
        for v in values {
            let t = scale.normalize(v).unwrap();
            prop_assert!((0.0..=1.0).contains(&t));
            prop_assert_ne!(scale.color_for(Some(v)), NO_DATA_COLOR);
        }
    }

    #[test]
    fn stack_invariants_hold(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut stack = NavigationStack::new(RegionKey::World);
        for op in ops {
            match op {
                Op::Push(k) => { stack.push(k); }
                Op::Pop => { stack.pop(); }
            }
            prop_assert!(stack.len() >= 1);
            prop_assert_eq!(stack.root(), RegionKey::World);
            for pair in stack.keys().windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
        }
    }
}
