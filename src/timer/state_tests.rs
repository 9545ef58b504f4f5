//! Tests for the interval sequencer transitions
//!
//! Covers input validation, per-tick countdown, boundary behavior,
//! pause/resume, and the unconditional finish reset.

use chrono::Utc;

use super::state::{Effect, Interval, TimerState, TimerStatus, DEFAULT_LABEL};

/// Build a state with the given (duration, label) pairs already queued.
fn queued(intervals: &[(u32, &str)]) -> TimerState {
    let mut state = TimerState::new();
    for (duration, label) in intervals {
        let interval =
            Interval::from_input(&duration.to_string(), label).expect("test interval should parse");
        assert!(state.add(interval));
    }
    state
}

#[test]
fn non_numeric_duration_is_rejected() {
    for input in ["", "   ", "abc", "12a", "-5", "1.5"] {
        assert!(
            Interval::from_input(input, "warmup").is_none(),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn zero_duration_is_rejected() {
    assert!(Interval::from_input("0", "warmup").is_none());
}

#[test]
fn blank_label_gets_placeholder() {
    let interval = Interval::from_input("30", "   ").unwrap();
    assert_eq!(interval.label, DEFAULT_LABEL);

    let interval = Interval::from_input("30", "sprint").unwrap();
    assert_eq!(interval.label, "sprint");
}

#[test]
fn add_is_ignored_mid_run() {
    let mut state = queued(&[(5, "work")]);
    state.start(Utc::now());

    let interval = Interval::from_input("10", "rest").unwrap();
    assert!(!state.add(interval.clone()), "add while running must fail");
    assert_eq!(state.intervals.len(), 1);

    state.stop();
    assert!(!state.add(interval), "add while paused must fail");
    assert_eq!(state.intervals.len(), 1);
}

#[test]
fn start_loads_first_interval_and_announces() {
    let mut state = queued(&[(30, "warmup"), (60, "sprint")]);

    let effects = state.start(Utc::now());

    assert_eq!(state.status, TimerStatus::Running);
    assert_eq!(state.remaining_secs, 30);
    assert!(state.started_at.is_some());
    assert_eq!(effects, vec![Effect::Announce("warmup".into())]);
}

#[test]
fn start_with_empty_queue_is_noop() {
    let mut state = TimerState::new();

    assert!(state.start(Utc::now()).is_empty());
    assert_eq!(state.status, TimerStatus::Idle);
}

#[test]
fn tick_decrements_by_exactly_one() {
    let mut state = queued(&[(3, "work")]);
    state.start(Utc::now());

    assert!(state.tick().is_empty());
    assert_eq!(state.remaining_secs, 2);
    assert!(state.tick().is_empty());
    assert_eq!(state.remaining_secs, 1);
}

#[test]
fn boundary_plays_cue_and_announces_next() {
    let mut state = queued(&[(1, "work"), (45, "rest")]);
    state.start(Utc::now());

    let effects = state.tick();

    assert_eq!(
        effects,
        vec![Effect::PlayCue, Effect::Announce("rest".into())]
    );
    assert_eq!(state.current_index, 1);
    assert_eq!(state.remaining_secs, 45);
    assert_eq!(state.status, TimerStatus::Running);
}

#[test]
fn exhausting_the_queue_finishes() {
    let mut state = queued(&[(2, "work")]);
    state.start(Utc::now());

    state.tick();
    let effects = state.tick();

    assert_eq!(effects, vec![Effect::PlayCue], "no next label to announce");
    assert_eq!(state.status, TimerStatus::Finished);
    assert_eq!(state.display(), "Done");
}

#[test]
fn stop_then_start_resumes_exact_remaining() {
    let mut state = queued(&[(10, "work")]);
    state.start(Utc::now());
    state.tick();
    state.tick();
    assert_eq!(state.remaining_secs, 8);

    state.stop();
    assert_eq!(state.status, TimerStatus::Paused);
    assert!(state.tick().is_empty(), "paused timer must not tick");
    assert_eq!(state.remaining_secs, 8);

    let effects = state.start(Utc::now());
    assert_eq!(state.status, TimerStatus::Running);
    assert_eq!(state.remaining_secs, 8);
    assert_eq!(effects, vec![Effect::Announce("work".into())]);
}

#[test]
fn finish_resets_index_and_remaining() {
    let mut state = queued(&[(5, "a"), (5, "b")]);
    state.start(Utc::now());
    for _ in 0..5 {
        state.tick();
    }
    assert_eq!(state.current_index, 1, "should be in the second interval");

    state.finish();

    assert_eq!(state.status, TimerStatus::Finished);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.remaining_secs, 0);

    // Unconditional from any state, Paused included
    let mut paused = queued(&[(5, "a")]);
    paused.start(Utc::now());
    paused.stop();
    paused.finish();
    assert_eq!(paused.status, TimerStatus::Finished);
    assert_eq!(paused.current_index, 0);
    assert_eq!(paused.remaining_secs, 0);
}

#[test]
fn start_after_finish_restarts_from_first_interval() {
    let mut state = queued(&[(1, "work"), (1, "rest")]);
    state.start(Utc::now());
    state.tick();
    state.tick();
    assert_eq!(state.status, TimerStatus::Finished);

    let effects = state.start(Utc::now());

    assert_eq!(state.status, TimerStatus::Running);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.remaining_secs, 1);
    assert_eq!(effects, vec![Effect::Announce("work".into())]);
}

#[test]
fn display_formats_zero_padded_minutes_and_seconds() {
    let mut state = queued(&[(90, "work")]);
    assert_eq!(state.display(), "00:00");

    state.start(Utc::now());
    assert_eq!(state.display(), "01:30");

    state.tick();
    assert_eq!(state.display(), "01:29");
}
