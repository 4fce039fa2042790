//! Tests for ScheduledTask.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::schedule::ScheduledTask;

fn counting_task(period_ms: u64, stop_after: usize) -> (ScheduledTask, Arc<AtomicUsize>) {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let task = ScheduledTask::every(Duration::from_millis(period_ms), move || {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 >= stop_after {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    });
    (task, ticks)
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_period() {
    let (task, ticks) = counting_task(100, usize::MAX);

    tokio::time::sleep(Duration::from_millis(99)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 4);
    assert!(task.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_break_ends_the_task() {
    let (task, ticks) = counting_task(10, 3);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    assert!(!task.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_future_ticks() {
    let (task, ticks) = counting_task(10, usize::MAX);

    tokio::time::sleep(Duration::from_millis(25)).await;
    task.cancel();
    assert!(!task.is_active());
    let seen = ticks.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels() {
    let (task, ticks) = counting_task(10, usize::MAX);
    drop(task);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_exit() {
    let (task, ticks) = counting_task(10, usize::MAX);
    tokio::time::sleep(Duration::from_millis(15)).await;

    task.shutdown().await;
    let seen = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
}
