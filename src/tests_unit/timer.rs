use super::*;
use std::time::Duration;

#[test]
fn unbounded_never_ends_on_its_own() {
    let timer = Timer::unbounded();
    assert!(!timer.needs_to_end());
}

#[test]
fn with_limit_ends_after_the_deadline() {
    let timer = Timer::with_limit(Duration::from_millis(10));
    assert!(!timer.needs_to_end());
    std::thread::sleep(Duration::from_millis(30));
    assert!(timer.needs_to_end());
}

#[test]
fn interrupt_ends_immediately_regardless_of_deadline() {
    let timer = Timer::unbounded();
    let handle = timer.interrupt_handle();
    assert!(!timer.needs_to_end());
    handle.store(true, std::sync::atomic::Ordering::Relaxed);
    assert!(timer.needs_to_end());
}

#[test]
fn interrupt_method_is_equivalent_to_flipping_the_handle() {
    let timer = Timer::unbounded();
    timer.interrupt();
    assert!(timer.needs_to_end());
}

#[test]
fn elapsed_seconds_is_monotone() {
    let timer = Timer::unbounded();
    let first = timer.elapsed_seconds();
    std::thread::sleep(Duration::from_millis(5));
    let second = timer.elapsed_seconds();
    assert!(second >= first);
}
