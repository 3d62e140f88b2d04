//! Behaviour tests for cancellable periodic work.

use crate::prefs::Preferences;
use crate::timer::Ticker;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn ticks_repeat_until_stopped() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let ticker = Ticker::every(Duration::from_millis(10), move || {
        let inner = Arc::clone(&counter);
        async move {
            inner.fetch_add(1, Ordering::SeqCst);
        }
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(count.load(Ordering::SeqCst) >= 2);

    ticker.stop();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_stop = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_stop);
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_ticker_cancels_its_schedule() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    {
        let _ticker = Ticker::every(Duration::from_millis(10), move || {
            let inner = Arc::clone(&counter);
            async move {
                inner.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_drop = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_drop);
}

#[tokio::test(flavor = "multi_thread")]
async fn auto_refresh_is_disabled_at_interval_zero() {
    let prefs = Preferences::default();
    let ticker = Ticker::auto_refresh(&prefs, || async {});
    assert!(ticker.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn auto_refresh_starts_at_the_preferred_interval() {
    let mut prefs = Preferences::default();
    prefs.set_auto_refresh_secs(60);

    let ticker = Ticker::auto_refresh(&prefs, || async {});

    let started = ticker.is_some_and(|active| {
        let running = !active.is_finished();
        active.stop();
        running
    });
    assert!(started);
}
