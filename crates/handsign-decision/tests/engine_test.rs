use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};
use handsign_core::config::{DecisionConfig, HandsignConfig, PolicyKind, SessionConfig};
use handsign_core::errors::{DecisionError, InsufficientInput};
use handsign_core::{CandidateSet, LabelTexts, VerdictMode};
use handsign_decision::DecisionEngine;
use handsign_session::{SessionState, SessionStore, VotingWindow};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

fn ms(n: i64) -> Duration {
    Duration::milliseconds(n)
}

fn top1(label: &str, p: f64) -> CandidateSet {
    CandidateSet::from_pairs([(label, p)]).unwrap()
}

fn window_engine() -> DecisionEngine {
    DecisionEngine::from_config(&HandsignConfig::default())
}

fn streak_engine() -> DecisionEngine {
    let mut config = HandsignConfig::default();
    config.decision.policy = PolicyKind::Streak;
    DecisionEngine::from_config(&config)
}

// ── Window-voting policy ─────────────────────────────────────────────────

#[test]
fn window_finalizes_on_fifth_agreeing_request() {
    let engine = window_engine();

    for i in 0..4 {
        let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100));
        assert_eq!(v.mode, VerdictMode::Pending, "request {} should be pending", i + 1);
        assert_eq!(v.streak_or_window_size, (i + 1) as usize);
    }

    let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(400));
    assert_eq!(v.mode, VerdictMode::Final);
    assert_eq!(v.label, "HELLO");
    assert!((v.confidence - 0.8).abs() < 1e-9);
    assert_eq!(v.streak_or_window_size, 5);

    let state = engine.store().snapshot("cam-1").unwrap();
    assert!(state.window.is_empty(), "window must be cleared after a final");
    assert_eq!(state.finals, 1);
}

#[test]
fn cooldown_suppresses_immediate_refinal() {
    let engine = window_engine();
    for i in 0..5 {
        engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100));
    }

    // 6th request 100ms after the final, inside the 700ms cooldown.
    let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(500));
    assert_eq!(v.mode, VerdictMode::Pending);
    // The window keeps growing during cooldown.
    assert_eq!(v.streak_or_window_size, 1);
}

#[test]
fn window_full_during_cooldown_finalizes_once_gate_reopens() {
    let engine = window_engine();
    for i in 0..5 {
        engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 10));
    }
    // Final at t0+40ms, cooldown until t0+740ms.
    for i in 0..5 {
        let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(100 + i * 10));
        assert!(v.is_pending());
    }
    let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(800));
    assert!(v.is_final());
}

#[test]
fn sub_threshold_requests_do_not_enter_window() {
    let engine = window_engine();
    engine.decide("cam-1", &top1("HELLO", 0.8), false, t0());
    let v = engine.decide("cam-1", &top1("HELLO", 0.59), false, t0() + ms(100));

    assert_eq!(v.mode, VerdictMode::Pending);
    assert_eq!(v.label, "HELLO");
    assert!((v.confidence - 0.59).abs() < 1e-9);
    assert_eq!(v.streak_or_window_size, 1);
    assert_eq!(engine.store().snapshot("cam-1").unwrap().window.len(), 1);
}

#[test]
fn split_vote_stays_pending() {
    let engine = window_engine();
    let labels = ["HELLO", "BYE", "HELLO", "BYE", "THANKS"];
    let mut last = None;
    for (i, label) in labels.iter().enumerate() {
        last = Some(engine.decide("cam-1", &top1(label, 0.9), false, t0() + ms(i as i64 * 100)));
    }
    let v = last.unwrap();
    assert_eq!(v.mode, VerdictMode::Pending);
    // HELLO is the first-seen label among the tied leaders.
    assert_eq!(v.label, "HELLO");
    assert_eq!(v.streak_or_window_size, 5);
}

#[test]
fn low_average_probability_blocks_final() {
    let mut config = HandsignConfig::default();
    config.decision.min_avg_prob = 0.9;
    let engine = DecisionEngine::from_config(&config);

    let mut v = None;
    for i in 0..5 {
        v = Some(engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100)));
    }
    let v = v.unwrap();
    assert!(v.is_pending());
    assert!((v.confidence - 0.8).abs() < 1e-9);
}

#[test]
fn candidates_are_truncated_to_top_k_and_passed_through() {
    let mut config = HandsignConfig::default();
    config.decision.top_k = 2;
    let engine = DecisionEngine::from_config(&config);

    let set = CandidateSet::from_pairs([("A", 0.7), ("B", 0.2), ("C", 0.1)]).unwrap();
    let v = engine.decide("cam-1", &set, false, t0());
    assert_eq!(v.candidates.len(), 2);
    assert_eq!(v.candidates[1].label, "B");
}

// ── Consecutive-streak policy ────────────────────────────────────────────

#[test]
fn streak_finalizes_on_exactly_the_eighth_request() {
    let engine = streak_engine();

    for i in 1..=7 {
        let v = engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(i * 100));
        assert_eq!(v.mode, VerdictMode::Pending, "request {i} should be pending");
        assert_eq!(v.streak_or_window_size, i as usize);
    }
    let v = engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(800));
    assert_eq!(v.mode, VerdictMode::Final);
    assert_eq!(v.streak_or_window_size, 8);
    assert!((v.confidence - 0.9).abs() < 1e-9);
}

#[test]
fn streak_keeps_reporting_final_until_broken() {
    let engine = streak_engine();
    for i in 0..8 {
        engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(i * 100));
    }
    let v = engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(900));
    assert!(v.is_final());
    assert_eq!(v.streak_or_window_size, 9);

    let v = engine.decide("cam-1", &top1("BYE", 0.9), false, t0() + ms(1000));
    assert!(v.is_pending());
    assert_eq!(v.streak_or_window_size, 1);
}

#[test]
fn streak_resets_to_zero_on_unqualified_request() {
    let engine = streak_engine();
    engine.decide("cam-1", &top1("HELLO", 0.9), false, t0());
    engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(100));
    let v = engine.decide("cam-1", &top1("HELLO", 0.3), false, t0() + ms(200));
    assert_eq!(v.streak_or_window_size, 0);

    let state = engine.store().snapshot("cam-1").unwrap();
    assert_eq!(state.streak, 0);
    assert_eq!(state.last_label.as_deref(), Some("HELLO"));
}

// ── Force-final override ─────────────────────────────────────────────────

#[test]
fn force_final_bypasses_thresholds() {
    for engine in [window_engine(), streak_engine()] {
        let v = engine.decide("cam-1", &top1("BYE", 0.3), true, t0());
        assert_eq!(v.mode, VerdictMode::Final);
        assert_eq!(v.label, "BYE");
        assert!((v.confidence - 0.3).abs() < 1e-9);
    }
}

#[test]
fn force_final_ignores_cooldown_and_leaves_window_alone() {
    let engine = window_engine();
    for i in 0..5 {
        engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 10));
    }
    engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(60));

    let v = engine.decide("cam-1", &top1("BYE", 0.4), true, t0() + ms(70));
    assert!(v.is_final());
    assert_eq!(v.label, "BYE");
    assert_eq!(engine.store().snapshot("cam-1").unwrap().window.len(), 1);
}

// ── Error path ───────────────────────────────────────────────────────────

fn evidence_snapshot(state: &SessionState) -> (Option<String>, u32, Option<DateTime<Utc>>, VotingWindow) {
    (state.last_label.clone(), state.streak, state.cooldown.until(), state.window.clone())
}

#[test]
fn insufficient_input_never_mutates_session() {
    for engine in [window_engine(), streak_engine()] {
        for i in 0..5 {
            engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100));
        }
        let before = engine.store().snapshot("cam-1").unwrap();

        let reason: DecisionError = InsufficientInput::TooFewFrames {
            received: 10,
            required: 30,
        }
        .into();
        let v = engine.reject("cam-1", &reason);

        assert_eq!(v.mode, VerdictMode::Error);
        assert_eq!(v.confidence, 0.0);
        let after = engine.store().snapshot("cam-1").unwrap();
        assert_eq!(evidence_snapshot(&before), evidence_snapshot(&after));
        assert_eq!(before.last_seen_at, after.last_seen_at);
    }
}

#[test]
fn reject_reports_current_evidence() {
    let engine = streak_engine();
    for i in 0..3 {
        engine.decide("cam-1", &top1("HELLO", 0.9), false, t0() + ms(i * 100));
    }
    let v = engine.reject("cam-1", &DecisionError::EmptyCandidates);
    assert_eq!(v.streak_or_window_size, 3);

    let v = engine.reject("unknown", &DecisionError::EmptyCandidates);
    assert_eq!(v.streak_or_window_size, 0);
    assert!(!engine.store().contains("unknown"));
}

#[test]
fn empty_candidate_set_is_an_error_without_session_creation() {
    let engine = window_engine();
    let v = engine.decide("cam-1", &CandidateSet::default(), false, t0());
    assert!(v.is_error());
    assert!(engine.store().snapshot("cam-1").is_none());
}

#[test]
fn corrupted_window_degrades_to_error_and_resets() {
    let engine = window_engine();
    engine.decide("cam-1", &top1("HELLO", 0.8), false, t0());

    let mut state = engine.store().snapshot("cam-1").unwrap();
    state.window = serde_json::from_value(serde_json::json!({
        "capacity": 1,
        "entries": [
            [{"label": "HELLO", "probability": 0.8}],
            [{"label": "HELLO", "probability": 0.8}]
        ]
    }))
    .unwrap();
    state.streak = 5;
    engine.store().insert(state);

    let v = engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(100));
    assert!(v.is_error());
    assert_eq!(v.confidence, 0.0);

    let state = engine.store().snapshot("cam-1").unwrap();
    assert!(state.window.is_empty());
    assert_eq!(state.streak, 0);
    assert!(state.last_label.is_none());
}

// ── Sessions ─────────────────────────────────────────────────────────────

#[test]
fn sessions_do_not_share_evidence() {
    let engine = window_engine();
    for i in 0..4 {
        engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100));
    }
    let v = engine.decide("cam-2", &top1("HELLO", 0.8), false, t0() + ms(400));
    assert!(v.is_pending());
    assert_eq!(v.streak_or_window_size, 1);
}

#[test]
fn idle_session_is_swept_and_restarts_fresh() {
    let engine = window_engine();
    for i in 0..4 {
        engine.decide("idle", &top1("HELLO", 0.8), false, t0() + ms(i * 100));
    }

    // Another session's request 31s later triggers the inline sweep.
    engine.decide("other", &top1("BYE", 0.8), false, t0() + Duration::seconds(31));
    assert!(!engine.store().contains("idle"));

    let v = engine.decide("idle", &top1("HELLO", 0.8), false, t0() + Duration::seconds(32));
    assert!(v.is_pending());
    assert_eq!(v.streak_or_window_size, 1);
}

#[test]
fn engines_with_separate_stores_are_isolated() {
    let config = DecisionConfig::default();
    let a = DecisionEngine::new(config.clone(), Arc::new(SessionStore::new()));
    let b = DecisionEngine::new(config, Arc::new(SessionStore::new()));

    a.decide("cam-1", &top1("HELLO", 0.8), false, t0());
    assert!(b.store().snapshot("cam-1").is_none());
}

#[test]
fn engines_can_share_an_injected_store() {
    let store = Arc::new(SessionStore::with_config(SessionConfig::default(), 5));
    let a = DecisionEngine::new(DecisionConfig::default(), Arc::clone(&store));
    a.decide("cam-1", &top1("HELLO", 0.8), false, t0());
    assert!(store.contains("cam-1"));
}

#[test]
fn injected_store_uses_configured_window_size() {
    let config = DecisionConfig {
        window_size: 3,
        ..DecisionConfig::default()
    };
    let engine = DecisionEngine::new(config, Arc::new(SessionStore::new()));

    let modes: Vec<VerdictMode> = (0..3)
        .map(|i| engine.decide("cam-1", &top1("HELLO", 0.8), false, t0() + ms(i * 100)).mode)
        .collect();
    assert_eq!(modes, vec![VerdictMode::Pending, VerdictMode::Pending, VerdictMode::Final]);

    let state = engine.store().snapshot("cam-1").unwrap();
    assert_eq!(state.window.capacity(), 3);
}

#[test]
fn try_decide_leaves_sweeping_to_the_caller() {
    let engine = window_engine();
    engine.decide("idle", &top1("HELLO", 0.8), false, t0());

    let later = t0() + Duration::seconds(31);
    engine.try_decide("other", &top1("BYE", 0.8), false, later).unwrap();
    assert!(engine.store().contains("idle"));

    assert_eq!(engine.sweep_idle(later), 1);
    assert!(!engine.store().contains("idle"));
}

#[test]
fn text_lookup_fills_verdict_text() {
    let texts: LabelTexts = [("WORD00001", "hello")].into_iter().collect();
    let engine = window_engine().with_texts(texts);

    let v = engine.decide("cam-1", &top1("WORD00001", 0.3), true, t0());
    assert_eq!(v.text, "hello");
    let v = engine.decide("cam-1", &top1("WORD00002", 0.3), true, t0());
    assert_eq!(v.text, "WORD00002");
}

#[test]
fn concurrent_requests_for_one_session_are_serialized() {
    let engine = Arc::new(streak_engine());
    let mut handles = vec![];
    for _ in 0..4 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                engine.decide("shared", &top1("HELLO", 0.9), false, t0());
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let state = engine.store().snapshot("shared").unwrap();
    assert_eq!(state.streak, 200);
    assert_eq!(state.requests, 200);
}

#[test]
fn concurrent_distinct_sessions_each_finalize_once() {
    let engine = Arc::new(window_engine());
    let mut handles = vec![];
    for s in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            let sid = format!("cam-{s}");
            let mut finals = 0;
            for i in 0..5 {
                let v = engine.decide(&sid, &top1("HELLO", 0.8), false, t0() + ms(i * 100));
                if v.is_final() {
                    finals += 1;
                }
            }
            finals
        }));
    }
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
    assert_eq!(engine.store().len(), 8);
}
