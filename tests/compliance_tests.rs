use chrono::Duration;
use quicktrack::core::calculator::policy::BreakPolicy;
use quicktrack::core::collaborators::AnchorChoice;
use quicktrack::core::compliance::{
    AnchorSource, BREAK_ENGINE_KEY, BreakComplianceEngine, ComplianceOutcome,
};
use quicktrack::core::decision::{DecisionCache, MissReason};
use quicktrack::errors::AppError;
use quicktrack::models::decision::InsertionDecision;
use quicktrack::models::mode::TimeLogMode::{Break, Normal, Quit};

mod common;
use common::{MemoryStore, ScriptedChooser, at, day, entries};

fn engine() -> BreakComplianceEngine {
    BreakComplianceEngine::new(BreakPolicy::default())
}

#[test]
fn short_days_are_left_alone() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (12, 0, Normal), (14, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();

    assert_eq!(report.entries, input);
    assert!(matches!(report.outcome, ComplianceOutcome::NotOwed { .. }));
    assert_eq!(chooser.calls, 0);
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn exactly_six_hours_owes_nothing() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (14, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();
    assert!(!report.is_adjusted());
    assert_eq!(chooser.calls, 0);
}

#[test]
fn empty_and_single_entry_days_are_compliant() {
    let d = day(2024, 3, 4);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let empty = engine().apply(d, &[], &store, &mut chooser).unwrap();
    assert!(empty.entries.is_empty());

    let one = entries(d, &[(8, 0, Normal)]);
    let report = engine().apply(d, &one, &store, &mut chooser).unwrap();
    assert_eq!(report.entries, one);
    assert_eq!(chooser.calls, 0);
}

#[test]
fn enough_recorded_break_is_satisfied() {
    let d = day(2024, 3, 4);
    let input = entries(
        d,
        &[(8, 0, Normal), (12, 0, Break), (12, 30, Normal), (17, 0, Quit)],
    );
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();

    assert_eq!(report.entries, input);
    assert_eq!(
        report.outcome,
        ComplianceOutcome::Satisfied {
            total_pause: Duration::minutes(30)
        }
    );
    assert_eq!(chooser.calls, 0);
}

#[test]
fn idle_time_after_other_modes_is_not_break() {
    let d = day(2024, 3, 4);
    // Two hours after Quit, but no Break entry at all.
    let input = entries(d, &[(8, 0, Normal), (12, 0, Quit), (14, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(1);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();
    assert!(report.is_adjusted());
    assert_eq!(
        chooser.last_request.unwrap().remaining,
        Duration::minutes(30)
    );
}

#[test]
fn seven_hour_day_gets_thirty_minutes_after_the_anchor() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (11, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(1);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();
    let out = &report.entries;

    assert_eq!(out.len(), input.len() + 1);
    assert_eq!(out[0], input[0]);
    assert_eq!(out[1], input[1]);

    let brk = &out[2];
    assert_eq!(brk.mode, Break);
    assert!(brk.message.is_empty());
    assert!(brk.synthetic);
    assert_eq!(brk.timestamp, at(d, 15, 0));
    assert_eq!(brk.project, input[1].project);

    assert_eq!(out[3].timestamp, at(d, 15, 30));
    assert_eq!(out[3].id, input[2].id);

    assert_eq!(
        report.outcome,
        ComplianceOutcome::Inserted {
            anchor: 1,
            remaining: Duration::minutes(30),
            source: AnchorSource::Chosen {
                previous: MissReason::Missing
            },
        }
    );
}

#[test]
fn only_the_shortfall_is_inserted() {
    let d = day(2024, 3, 4);
    let input = entries(
        d,
        &[(8, 0, Normal), (10, 0, Break), (10, 10, Normal), (16, 0, Quit)],
    );
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();
    let out = &report.entries;

    assert_eq!(out.len(), 5);
    assert_eq!(out[1].timestamp, at(d, 10, 0));
    assert!(out[1].synthetic);
    for (orig, shifted) in input[1..].iter().zip(&out[2..]) {
        assert_eq!(shifted.timestamp - orig.timestamp, Duration::minutes(20));
    }
}

#[test]
fn last_entry_as_anchor_keeps_its_own_timestamp() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(1);

    let out = engine()
        .apply(d, &input, &store, &mut chooser)
        .unwrap()
        .entries;

    assert_eq!(out.len(), 3);
    assert_eq!(out[2].timestamp, at(d, 15, 0));
    assert_eq!(out[2].mode, Break);
}

#[test]
fn second_run_reuses_the_stored_anchor() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (11, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::new(&[AnchorChoice::Selected(0)]);

    let first = engine().apply(d, &input, &store, &mut chooser).unwrap();
    let second = engine().apply(d, &input, &store, &mut chooser).unwrap();

    assert_eq!(chooser.calls, 1);
    assert_eq!(first.entries, second.entries);
    assert_eq!(
        serde_json::to_string(&first.entries).unwrap(),
        serde_json::to_string(&second.entries).unwrap()
    );
    assert!(matches!(
        second.outcome,
        ComplianceOutcome::Inserted {
            source: AnchorSource::Cached,
            ..
        }
    ));
    assert_eq!(*store.writes.borrow(), 1);
}

#[test]
fn changed_entry_count_invalidates_the_decision() {
    let d = day(2024, 3, 4);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::new(&[AnchorChoice::Selected(0), AnchorChoice::Selected(2)]);

    let before = entries(d, &[(8, 0, Normal), (11, 0, Normal), (15, 0, Quit)]);
    engine().apply(d, &before, &store, &mut chooser).unwrap();

    let after = entries(
        d,
        &[(8, 0, Normal), (11, 0, Normal), (13, 0, Normal), (15, 0, Quit)],
    );
    let report = engine().apply(d, &after, &store, &mut chooser).unwrap();

    assert_eq!(chooser.calls, 2);
    assert_eq!(
        report.outcome,
        ComplianceOutcome::Inserted {
            anchor: 2,
            remaining: Duration::minutes(30),
            source: AnchorSource::Chosen {
                previous: MissReason::EntryCountChanged {
                    stored: 3,
                    current: 4
                }
            },
        }
    );
    let stored = store.decisions.borrow()[&(d, BREAK_ENGINE_KEY.to_string())];
    assert_eq!(stored.total_entries, 4);
    assert_eq!(stored.after_entry_index, 2);
}

#[test]
fn out_of_range_stored_decision_is_a_miss() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (11, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    store.decisions.borrow_mut().insert(
        (d, BREAK_ENGINE_KEY.to_string()),
        InsertionDecision {
            interval_index: 0,
            total_entries: 3,
            after_entry_index: 9,
        },
    );
    let mut chooser = ScriptedChooser::always(0);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();
    assert_eq!(chooser.calls, 1);
    assert!(report.is_adjusted());
}

#[test]
fn cancelling_changes_nothing() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::new(&[AnchorChoice::Cancelled]);

    let report = engine().apply(d, &input, &store, &mut chooser).unwrap();

    assert_eq!(report.entries, input);
    assert_eq!(
        report.outcome,
        ComplianceOutcome::Cancelled {
            remaining: Duration::minutes(30)
        }
    );
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn chooser_answer_out_of_range_is_an_error() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(5);

    let err = engine()
        .apply(d, &input, &store, &mut chooser)
        .unwrap_err();
    assert!(matches!(err, AppError::OutOfRangeDecision { index: 5, len: 2 }));
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn unordered_input_fails_fast() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (16, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let err = engine()
        .apply(d, &input, &store, &mut chooser)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidSequenceOrder { index: 2, .. }));
    assert_eq!(chooser.calls, 0);
}

#[test]
fn window_hint_marks_late_candidates() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (10, 0, Normal), (13, 0, Normal), (16, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    engine().apply(d, &input, &store, &mut chooser).unwrap();

    // Window ends 6h after the first entry: 14:00.
    assert_eq!(chooser.last_window_hints, vec![true, true, false, false]);
}

#[test]
fn engines_with_different_keys_do_not_share_decisions() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (15, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let a = BreakComplianceEngine::with_key(BreakPolicy::default(), "a");
    let b = BreakComplianceEngine::with_key(BreakPolicy::default(), "b");
    a.apply(d, &input, &store, &mut chooser).unwrap();
    b.apply(d, &input, &store, &mut chooser).unwrap();

    assert_eq!(chooser.calls, 2);
    assert_eq!(store.decisions.borrow().len(), 2);
}

#[test]
fn custom_policy_changes_the_threshold() {
    let d = day(2024, 3, 4);
    let input = entries(d, &[(8, 0, Normal), (13, 0, Quit)]);
    let store = MemoryStore::default();
    let mut chooser = ScriptedChooser::always(0);

    let policy = BreakPolicy {
        min_span: Duration::hours(4),
        first_break: Duration::minutes(15),
        ..BreakPolicy::default()
    };
    let report = BreakComplianceEngine::new(policy)
        .apply(d, &input, &store, &mut chooser)
        .unwrap();

    assert_eq!(report.entries[1].timestamp, at(d, 13, 0));
    assert_eq!(report.entries[2].timestamp, at(d, 13, 15));
    assert!(matches!(
        report.outcome,
        ComplianceOutcome::Inserted { remaining, .. } if remaining == Duration::minutes(15)
    ));
}

#[test]
fn cache_get_hits_only_for_the_same_entry_count() {
    let store = MemoryStore::default();
    let cache = DecisionCache::new(&store, "cache-test");
    let d = day(2024, 3, 4);

    assert_eq!(cache.get(d, 0, 3).unwrap(), None);

    cache.put(d, 0, 3, 1).unwrap();
    assert_eq!(cache.get(d, 0, 3).unwrap(), Some(1));
    assert_eq!(cache.get(d, 0, 4).unwrap(), None);
    assert_eq!(cache.get(d, 1, 3).unwrap(), None);
    assert_eq!(cache.get(day(2024, 3, 5), 0, 3).unwrap(), None);
    assert_eq!(*store.writes.borrow(), 1);
}
