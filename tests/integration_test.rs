// Integration tests for the recursion engine

use pretty_assertions::assert_eq;
use recurtty::engine::algorithms::PALINDROME_MAX_LEN;
use recurtty::engine::{Algorithm, Controller, Invocation, NoPacing, PlaybackConfig, Speed};
use recurtty::memory::MEMORY_CAPACITY;
use recurtty::snapshot::{LogKind, Snapshot};
use recurtty::tree::{CallTree, FrameStatus};

fn run(invocation: Invocation) -> Controller {
    let mut controller = Controller::new(PlaybackConfig {
        speed: Speed::INSTANT,
        ..PlaybackConfig::default()
    });
    controller
        .run(invocation, &mut NoPacing)
        .expect("run should not be rejected");
    controller
}

/// Pre-order `(level, args, return)` rows of a tree
fn shape(tree: &CallTree) -> Vec<(usize, String, Option<String>)> {
    tree.walk()
        .into_iter()
        .map(|(level, frame)| (level, frame.args.clone(), frame.return_value.clone()))
        .collect()
}

fn fib(n: u64) -> u64 {
    if n <= 1 {
        n
    } else {
        fib(n - 1) + fib(n - 2)
    }
}

#[test]
fn test_factorial_builds_a_chain() {
    let controller = run(Invocation::Factorial(4));
    let snapshot = controller.displayed();

    assert_eq!(
        shape(&snapshot.tree),
        vec![
            (0, "n=4".to_string(), Some("24".to_string())),
            (1, "n=3".to_string(), Some("6".to_string())),
            (2, "n=2".to_string(), Some("2".to_string())),
            (3, "n=1".to_string(), Some("1".to_string())),
        ]
    );
    assert!(snapshot
        .tree
        .frames()
        .iter()
        .all(|f| f.status == FrameStatus::Completed && f.note.is_none()));
    assert!(snapshot.log.contains(LogKind::Success, "Return: 24"));
    assert!(snapshot.log.contains(LogKind::System, "Prepare: Factorial(4)"));
    assert!(snapshot
        .log
        .contains(LogKind::Info, "Base Case: n=1 -> return 1"));
}

#[test]
fn test_fibonacci_three() {
    let controller = run(Invocation::Fibonacci(3));
    let snapshot = controller.displayed();

    assert_eq!(
        shape(&snapshot.tree),
        vec![
            (0, "n=3".to_string(), Some("2".to_string())),
            (1, "n=2".to_string(), Some("1".to_string())),
            (2, "n=1".to_string(), Some("1".to_string())),
            (2, "n=0".to_string(), Some("0".to_string())),
            (1, "n=1".to_string(), Some("1".to_string())),
        ]
    );
    assert!(snapshot.log.contains(LogKind::System, "Combine: 1 + 0"));
    assert!(snapshot.log.contains(LogKind::System, "Combine: 1 + 1"));
}

#[test]
fn test_fibonacci_waits_between_children() {
    let controller = run(Invocation::Fibonacci(2));
    let history = controller.history();

    // Root frame turns Active with the wait note right before the second call
    let waiting = history
        .iter()
        .filter(|s| {
            s.tree
                .root_frame()
                .is_some_and(|f| f.note.as_deref() == Some("Wait...") && f.status == FrameStatus::Active)
        })
        .count();
    assert_eq!(waiting, 1);
}

#[test]
fn test_power_of_two() {
    let controller = run(Invocation::Power(3));
    let snapshot = controller.displayed();

    assert_eq!(snapshot.tree.len(), 4);
    let root = snapshot.tree.root_frame().expect("root frame");
    assert_eq!(root.args, "x=2,n=3");
    assert_eq!(root.return_value.as_deref(), Some("8"));
    assert!(snapshot.log.contains(LogKind::Success, "Return: 8"));
}

#[test]
fn test_palindrome_match_and_mismatch() {
    let controller = run(Invocation::Palindrome("aba".to_string()));
    let snapshot = controller.displayed();
    assert_eq!(snapshot.tree.len(), 2);
    assert_eq!(
        snapshot.tree.root_frame().and_then(|f| f.return_value.clone()),
        Some("true".to_string())
    );

    let controller = run(Invocation::Palindrome("abc".to_string()));
    let snapshot = controller.displayed();
    assert_eq!(snapshot.tree.len(), 1);
    assert_eq!(
        snapshot.tree.root_frame().and_then(|f| f.return_value.clone()),
        Some("false".to_string())
    );
    assert!(snapshot
        .log
        .contains(LogKind::Info, "Mismatch: \"abc\" -> return false"));
}

#[test]
fn test_palindrome_compares_characters_not_bytes() {
    let controller = run(Invocation::Palindrome("éaé".to_string()));
    let root = controller.displayed().tree.root_frame().cloned();
    assert_eq!(root.and_then(|f| f.return_value), Some("true".to_string()));
}

#[test]
fn test_frame_counts_follow_the_recurrence() {
    for n in 0..=12 {
        let controller = run(Invocation::Factorial(n));
        assert_eq!(controller.live().tree.len() as u64, n.max(1), "factorial({n})");
    }
    for n in 0..=7 {
        let controller = run(Invocation::Fibonacci(n));
        assert_eq!(
            controller.live().tree.len() as u64,
            2 * fib(n + 1) - 1,
            "fibonacci({n})"
        );
    }
    for n in 0..=8 {
        let controller = run(Invocation::Power(n));
        assert_eq!(controller.live().tree.len() as u64, n + 1, "power({n})");
    }
}

#[test]
fn test_live_state_matches_last_snapshot() {
    for invocation in [
        Invocation::Factorial(5),
        Invocation::Fibonacci(4),
        Invocation::Power(5),
        Invocation::Palindrome("racecar".to_string()),
    ] {
        let controller = run(invocation.clone());
        let last = controller.history().last().expect("history is not empty");
        assert!(controller.live().matches(last), "{invocation}");
        assert_eq!(controller.displayed(), last);
        assert!(controller.live().stack.is_empty());
        assert_eq!(controller.live().memory.occupied_count(), 0);
    }
}

fn assert_snapshot_invariants(snapshot: &Snapshot) {
    let live: Vec<usize> = snapshot
        .tree
        .live_frames()
        .map(|frame| frame.depth - 1)
        .collect();
    let mut expected = live.clone();
    expected.sort_unstable();
    assert_eq!(snapshot.memory.occupied_indices(), expected);

    for frame in snapshot.tree.live_frames() {
        let slot = snapshot.memory.slot(frame.depth - 1).expect("slot in range");
        assert_eq!(slot.frame_id(), Some(frame.id));
    }

    let bound = snapshot.stack.bound_count();
    assert_eq!(bound, live.len());
    let unbound = snapshot.stack.depth() - bound;
    assert!(unbound <= 1);
    if unbound == 1 {
        assert!(snapshot.stack.top().is_some_and(|entry| entry.frame.is_none()));
    }

    let highlighted = snapshot.stack.entries().iter().filter(|e| e.highlight).count();
    assert_eq!(highlighted, usize::from(!snapshot.stack.is_empty()));
}

#[test]
fn test_every_snapshot_keeps_memory_and_stack_consistent() {
    for invocation in [
        Invocation::Factorial(6),
        Invocation::Fibonacci(5),
        Invocation::Power(4),
        Invocation::Palindrome("level".to_string()),
        Invocation::Palindrome("abca".to_string()),
    ] {
        let controller = run(invocation);
        for snapshot in controller.history().iter() {
            assert_snapshot_invariants(snapshot);
        }
    }
}

#[test]
fn test_long_palindrome_stays_within_memory() {
    let controller = run(Invocation::Palindrome("a".repeat(200)));

    // 127 chars strip down to one in 64 calls, one per memory slot
    assert_eq!(controller.live().tree.len(), MEMORY_CAPACITY);
    assert_eq!(
        controller.displayed().tree.root_frame().map(|f| f.args.len()),
        Some(PALINDROME_MAX_LEN + 2)
    );
    for snapshot in controller.history().iter() {
        assert_snapshot_invariants(snapshot);
    }
    assert_eq!(
        controller
            .history()
            .iter()
            .map(|s| s.memory.occupied_count())
            .max(),
        Some(MEMORY_CAPACITY)
    );
}

#[test]
fn test_log_is_append_only_across_history() {
    let controller = run(Invocation::Fibonacci(4));
    let snapshots: Vec<&Snapshot> = controller.history().iter().collect();
    for pair in snapshots.windows(2) {
        let (before, after) = (&pair[0].log, &pair[1].log);
        assert!(after.len() >= before.len());
        assert_eq!(&after.entries()[..before.len()], before.entries());
    }
}

#[test]
fn test_selection_input_resolution() {
    assert_eq!(
        Algorithm::Factorial.invocation("20", ""),
        Invocation::Factorial(12)
    );
    assert_eq!(
        Algorithm::Fibonacci.invocation("-3", ""),
        Invocation::Fibonacci(0)
    );
    assert_eq!(
        Algorithm::Power.invocation("abc", ""),
        Invocation::Power(5)
    );
    assert_eq!(
        Algorithm::Palindrome.invocation("", ""),
        Invocation::Palindrome("racecar".to_string())
    );
}
