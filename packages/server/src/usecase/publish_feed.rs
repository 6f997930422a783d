//! UseCase: periodic feed publishing
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FeedPublisher::run() の送信間隔・タイムスタンプの単調増加・終了条件
//!
//! ### どのような状況を想定しているか
//! - 正常系：一定間隔での送信（tokio の仮想時間で検証）
//! - 異常系：書き込み失敗で即座に停止（失敗した書き込みを繰り返さない）

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;

use crate::{domain::MonotonicClock, infrastructure::dto::websocket::FeedPayload};

use super::error::FeedError;

/// Default interval between two feed payloads
pub const DEFAULT_FEED_INTERVAL: Duration = Duration::from_secs(2);

/// Destination of one subscriber's feed
#[async_trait]
pub trait FeedSink: Send {
    async fn publish(&mut self, line: String) -> Result<(), FeedError>;
}

/// Publishes timestamped payloads to feed subscribers.
///
/// Cheap to clone; clones share the clock and the subscriber count.
#[derive(Clone)]
pub struct FeedPublisher {
    interval: Duration,
    clock: Arc<MonotonicClock>,
    subscribers: Arc<AtomicUsize>,
}

impl FeedPublisher {
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(interval: Duration, clock: Arc<MonotonicClock>) -> Self {
        Self {
            interval,
            clock,
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of subscribers currently inside [`FeedPublisher::run`]
    pub fn active_subscribers(&self) -> usize {
        self.subscribers.load(Ordering::Relaxed)
    }

    /// Publish to `sink` every interval, starting immediately, until a write
    /// fails. Returns the number of payloads written.
    ///
    /// The sink is borrowed so the caller can still close it afterwards.
    pub async fn run<S: FeedSink>(&self, sink: &mut S) -> u64 {
        let _subscription = Subscription::new(self.subscribers.clone());

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut published = 0u64;
        loop {
            ticker.tick().await;

            let payload = FeedPayload::new(self.clock.now());
            if let Err(e) = sink.publish(payload.to_line()).await {
                tracing::debug!("Feed stopped after {} payloads: {}", published, e);
                return published;
            }
            published += 1;
        }
    }
}

impl Default for FeedPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_INTERVAL)
    }
}

/// Subscriber count held for the duration of one `run`
struct Subscription(Arc<AtomicUsize>);

impl Subscription {
    fn new(count: Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::Relaxed);
        Self(count)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
