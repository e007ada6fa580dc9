// Timeline playback and input-resolution tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use recurtty::engine::algorithms::{FACTORIAL_MAX_N, FIBONACCI_MAX_N, POWER_MAX_N};
use recurtty::engine::{
    Algorithm, Controller, Invocation, NoPacing, PlaybackConfig, PlaybackError, Speed,
};
use recurtty::snapshot::LogKind;

fn instant_controller() -> Controller {
    Controller::new(PlaybackConfig {
        speed: Speed::INSTANT,
        ..PlaybackConfig::default()
    })
}

#[test]
fn test_seek_is_idempotent() {
    let mut controller = instant_controller();
    controller
        .run(Invocation::Fibonacci(4), &mut NoPacing)
        .expect("run");

    controller.seek(7).expect("seek in range");
    let first = controller.displayed().clone();
    controller.seek(7).expect("seek in range");
    assert_eq!(controller.displayed(), &first);
    assert_eq!(controller.current_step(), 7);
}

#[test]
fn test_seek_never_touches_history_or_live_state() {
    let mut controller = instant_controller();
    controller
        .run(Invocation::Factorial(5), &mut NoPacing)
        .expect("run");

    let history_len = controller.total_steps();
    let live_frames = controller.live().tree.len();

    controller.rewind_to_start().expect("rewind");
    assert!(controller.displayed().tree.is_empty());
    assert_eq!(controller.displayed().stack.depth(), 1);

    controller.step_forward().expect("forward");
    controller.step_forward().expect("forward");
    controller.step_backward().expect("backward");
    assert_eq!(controller.current_step(), 1);

    controller.jump_to_end().expect("end");
    assert!(controller.is_at_end());
    assert_eq!(controller.total_steps(), history_len);
    assert_eq!(controller.live().tree.len(), live_frames);
    assert!(controller
        .live()
        .matches(controller.history().last().expect("last snapshot")));
}

#[test]
fn test_rejected_seeks_leave_display_unchanged() {
    let mut controller = instant_controller();
    assert_eq!(controller.seek(0), Err(PlaybackError::EmptyHistory));

    controller
        .run(Invocation::Power(2), &mut NoPacing)
        .expect("run");
    let total = controller.total_steps();
    let before = controller.displayed().clone();

    assert_eq!(
        controller.seek(total),
        Err(PlaybackError::StepOutOfRange { step: total, total })
    );
    assert_eq!(
        controller.step_forward(),
        Err(PlaybackError::StepOutOfRange { step: total, total })
    );
    assert_eq!(controller.displayed(), &before);

    controller.rewind_to_start().expect("rewind");
    assert!(controller.step_backward().is_err());
    assert_eq!(controller.current_step(), 0);
}

#[test]
fn test_reset_clears_history_and_notes_the_reset() {
    let mut controller = instant_controller();
    controller
        .run(Invocation::Factorial(3), &mut NoPacing)
        .expect("run");

    controller.reset().expect("reset");
    assert_eq!(controller.total_steps(), 0);
    assert!(controller.live().tree.is_empty());
    assert!(controller.displayed().tree.is_empty());
    assert_eq!(controller.displayed().memory.occupied_count(), 0);
    assert!(controller
        .displayed()
        .log
        .contains(LogKind::System, "Visualization reset."));
}

#[test]
fn test_second_run_replaces_the_first() {
    let mut controller = instant_controller();
    controller
        .run(Invocation::Fibonacci(5), &mut NoPacing)
        .expect("run");
    let summary = controller
        .run(Invocation::Palindrome("abc".to_string()), &mut NoPacing)
        .expect("run");

    assert_eq!(summary.result, "false");
    assert_eq!(summary.frames, 1);
    assert_eq!(controller.selected(), Algorithm::Palindrome);
    assert_eq!(controller.live().tree.len(), 1);
    assert!(!controller
        .displayed()
        .log
        .contains(LogKind::System, "Prepare: Fibonacci(5)"));
}

#[test]
fn test_summary_reports_steps_and_result() {
    let mut controller = instant_controller();
    let summary = controller
        .run(Invocation::Factorial(4), &mut NoPacing)
        .expect("run");

    assert_eq!(summary.invocation, Invocation::Factorial(4));
    assert_eq!(summary.result, "24");
    assert_eq!(summary.frames, 4);
    assert_eq!(summary.steps, controller.total_steps());
    assert!(!controller.is_running());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn numeric_input_is_clamped(raw in any::<i32>()) {
        let input = raw.to_string();
        let expected = (raw.max(0) as u64).min(FACTORIAL_MAX_N);
        prop_assert_eq!(
            Algorithm::Factorial.invocation(&input, ""),
            Invocation::Factorial(expected)
        );
        let expected = (raw.max(0) as u64).min(FIBONACCI_MAX_N);
        prop_assert_eq!(
            Algorithm::Fibonacci.invocation(&input, ""),
            Invocation::Fibonacci(expected)
        );
        let expected = (raw.max(0) as u64).min(POWER_MAX_N);
        prop_assert_eq!(
            Algorithm::Power.invocation(&input, ""),
            Invocation::Power(expected)
        );
    }

    #[test]
    fn palindrome_result_matches_reversal(word in "[ab]{0,9}") {
        let mut controller = instant_controller();
        let summary = controller
            .run(Invocation::Palindrome(word.clone()), &mut NoPacing)
            .expect("run");

        let reversed: String = word.chars().rev().collect();
        prop_assert_eq!(summary.result, (word == reversed).to_string());
    }

    #[test]
    fn every_seek_reproduces_the_recorded_snapshot(n in 0u64..=6, step in 0usize..200) {
        let mut controller = instant_controller();
        controller.run(Invocation::Fibonacci(n), &mut NoPacing).expect("run");

        let step = step % controller.total_steps();
        controller.seek(step).expect("seek in range");
        let recorded = controller.history().get(step).expect("recorded");
        prop_assert_eq!(controller.displayed(), recorded);
    }
}
