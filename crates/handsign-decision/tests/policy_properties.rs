use chrono::{Duration, TimeZone, Utc};
use handsign_core::config::{HandsignConfig, PolicyKind};
use handsign_core::{CandidateSet, VerdictMode};
use handsign_decision::DecisionEngine;
use proptest::prelude::*;

fn engine(policy: PolicyKind) -> DecisionEngine {
    let mut config = HandsignConfig::default();
    config.decision.policy = policy;
    DecisionEngine::from_config(&config)
}

fn label_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("HELLO"), Just("BYE"), Just("THANKS")]
}

proptest! {
    #[test]
    fn streak_finalizes_from_the_nth_identical_request(n in 1usize..24, p in 0.6f64..=1.0) {
        let engine = engine(PolicyKind::Streak);
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let set = CandidateSet::from_pairs([("HELLO", p)]).unwrap();
        for i in 1..=n {
            let v = engine.decide("s", &set, false, start + Duration::milliseconds(i as i64));
            prop_assert_eq!(v.is_final(), i >= 8);
            prop_assert_eq!(v.streak_or_window_size, i);
        }
    }

    #[test]
    fn verdicts_stay_well_formed(
        stream in prop::collection::vec((label_strategy(), 0.0f64..=1.0, 0i64..400), 1..40),
        policy in prop_oneof![Just(PolicyKind::Window), Just(PolicyKind::Streak)],
    ) {
        let engine = engine(policy);
        let mut now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut last_final = None;

        for (label, p, gap_ms) in stream {
            now += Duration::milliseconds(gap_ms);
            let set = CandidateSet::from_pairs([(label, p)]).unwrap();
            let v = engine.decide("s", &set, false, now);

            prop_assert_ne!(v.mode, VerdictMode::Error);
            prop_assert!((0.0..=1.0).contains(&v.confidence));
            prop_assert!(v.candidates.len() <= 5);

            if policy == PolicyKind::Window {
                prop_assert!(v.streak_or_window_size <= 5);
                if v.is_final() {
                    // Cooldown separates consecutive window finals.
                    if let Some(prev) = last_final {
                        prop_assert!(now - prev >= Duration::milliseconds(700));
                    }
                    last_final = Some(now);
                }
            }
        }
    }
}
