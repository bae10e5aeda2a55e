//! Property-based invariant tests for the slider controller and the ledger.
//!
//! 1. Any sequence of updates leaves 0 <= min <= avg <= max <= 40.
//! 2. set_min pushes avg/max up exactly when they fall below the new min.
//! 3. The deduplicated view holds one record per distinct input tuple.
//! 4. Each survivor is the last record stored for its tuple.
//! 5. Survivors keep storage order.

use brixscope::*;
use proptest::prelude::*;
use std::collections::HashSet;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Update {
    Min(f64),
    Avg(f64),
    Max(f64),
}

fn slider_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..=80).prop_map(|steps| steps as f64 * 0.5),
        -100.0f64..100.0,
    ]
}

fn update() -> impl Strategy<Value = Update> {
    prop_oneof![
        slider_value().prop_map(Update::Min),
        slider_value().prop_map(Update::Avg),
        slider_value().prop_map(Update::Max),
    ]
}

fn small_tuple() -> impl Strategy<Value = ClimateInputs> {
    (0u32..4, 0u32..3).prop_map(|(a, b)| {
        let min = 10.0 + a as f64 * 0.5;
        ClimateInputs::new(min, min + 2.0, min + 4.0, 11.0 + b as f64 * 0.1)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Ordering invariant
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ordering_holds_after_every_update(updates in proptest::collection::vec(update(), 1..64)) {
        let mut ctl = ConstrainedRangeController::default();

        for u in updates {
            match u {
                Update::Min(v) => ctl.set_min(v),
                Update::Avg(v) => ctl.set_avg(v),
                Update::Max(v) => ctl.set_max(v),
            };

            let (min, avg, max) = ctl.values();
            prop_assert!(0.0 <= min && min <= avg && avg <= max && max <= 40.0,
                "broken after {:?}: ({}, {}, {})", u, min, avg, max);
            prop_assert!(min <= 30.0);
            prop_assert!(avg <= 35.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. set_min propagation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_min_pushes_only_when_needed(
        setup in proptest::collection::vec(update(), 0..16),
        steps in 0u32..=60,
    ) {
        let mut ctl = ConstrainedRangeController::default();
        for u in setup {
            match u {
                Update::Min(v) => ctl.set_min(v),
                Update::Avg(v) => ctl.set_avg(v),
                Update::Max(v) => ctl.set_max(v),
            };
        }

        let v = steps as f64 * 0.5;
        let (_, avg_before, max_before) = ctl.values();
        ctl.set_min(v);

        if v > avg_before {
            prop_assert_eq!(ctl.avg(), v);
        } else {
            prop_assert_eq!(ctl.avg(), avg_before);
        }

        if v > max_before {
            prop_assert_eq!(ctl.max(), v);
        } else {
            prop_assert_eq!(ctl.max(), max_before);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Deduplicated view
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn view_is_latest_per_key_in_order(tuples in proptest::collection::vec(small_tuple(), 0..64)) {
        let mut ledger = PredictionHistoryLedger::new();
        for (i, t) in tuples.iter().enumerate() {
            ledger.record(*t, i as f64);
        }

        let view = ledger.deduplicated_view();
        let distinct: HashSet<ClimateInputs> = tuples.iter().copied().collect();

        prop_assert_eq!(view.len(), distinct.len());
        prop_assert_eq!(ledger.len(), tuples.len());

        for record in &view {
            let last = tuples.iter().rposition(|t| t == record.inputs()).unwrap();
            prop_assert_eq!(record.predicted_brix(), last as f64);
        }

        prop_assert!(view.windows(2).all(|w| w[0].sequence() < w[1].sequence()));
    }
}
