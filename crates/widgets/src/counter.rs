use crate::format::group_thousands;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use stockpage_core::view::port::CounterView;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// # Summary
/// 访客计数器动画。纯装饰用途，数值不代表任何真实统计。
///
/// # Invariants
/// - 数值单调不减，每次递增量在 [0, max_delta] 内。
/// - 不持久化，重新加载后回到初始种子。
pub struct CounterAnimator {
    value: AtomicU64,
    interval: Duration,
    max_delta: u64,
    view: Arc<dyn CounterView>,
}

impl CounterAnimator {
    pub fn new(interval: Duration, max_delta: u64, view: Arc<dyn CounterView>) -> Self {
        Self {
            value: AtomicU64::new(0),
            interval,
            max_delta,
            view,
        }
    }

    /// # Summary
    /// 以种子值启动计数器动画。
    ///
    /// # Logic
    /// 1. 写入种子值并立即渲染。
    /// 2. 启动后台任务，每个间隔调用一次 `tick`。
    ///
    /// # Arguments
    /// * `initial_value`: 初始种子。
    ///
    /// # Returns
    /// 后台任务的 `AbortHandle`。
    pub fn start(self: &Arc<Self>, initial_value: u64) -> AbortHandle {
        self.value.store(initial_value, Ordering::SeqCst);
        self.view.render_counter(&group_thousands(initial_value));
        info!("Visitor counter started at {}", initial_value);

        let counter = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + counter.interval, counter.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                counter.tick();
            }
        });
        handle.abort_handle()
    }

    /// # Summary
    /// 递增一次并重新渲染。
    ///
    /// # Returns
    /// 递增后的数值。
    pub fn tick(&self) -> u64 {
        let delta = rand::random_range(0..=self.max_delta);
        let previous = self
            .value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_add(delta))
            })
            .unwrap_or_else(|v| v);
        let value = previous.saturating_add(delta);
        debug!("Visitor counter +{} -> {}", delta, value);
        self.view.render_counter(&group_thousands(value));
        value
    }

    pub fn value(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }
}
