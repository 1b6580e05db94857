use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stockpage_core::view::error::WidgetError;
use stockpage_core::view::port::TestimonialView;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// # Summary
/// 用户评价轮播。
///
/// # Invariants
/// - 当前序号始终位于 [1, count]，从 1 开始。
/// - 任意一次 `show` 之后，恰好一条评价与一个指示点处于激活状态。
/// - 自动轮播总是从最近一次 `show` 设置的序号继续推进。
pub struct TestimonialRotator {
    // 评价条数 N
    count: usize,
    // 自动轮播间隔
    interval: Duration,
    // 当前激活序号
    current: AtomicUsize,
    view: Arc<dyn TestimonialView>,
}

impl TestimonialRotator {
    /// # Summary
    /// 创建轮播实例，并立即激活第 1 条。
    ///
    /// # Arguments
    /// * `count`: 评价条数，取值至少为 1。
    /// * `interval`: 自动轮播间隔。
    /// * `view`: 渲染端口。
    pub fn new(count: usize, interval: Duration, view: Arc<dyn TestimonialView>) -> Self {
        let rotator = Self {
            count: count.max(1),
            interval,
            current: AtomicUsize::new(1),
            view,
        };
        rotator.render(1);
        rotator
    }

    /// # Summary
    /// 激活指定序号的评价。
    ///
    /// # Logic
    /// 1. 校验序号在 [1, count] 内。
    /// 2. 先取消全部评价与指示点的激活，再激活目标序号。
    /// 3. 记录为当前序号。
    ///
    /// # Arguments
    /// * `index`: 从 1 开始的序号。
    ///
    /// # Returns
    /// 越界时返回 `WidgetError::IndexOutOfRange`，状态不变。
    pub fn show(&self, index: usize) -> Result<(), WidgetError> {
        if index == 0 || index > self.count {
            return Err(WidgetError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        self.render(index);
        self.current.store(index, Ordering::SeqCst);
        Ok(())
    }

    /// # Summary
    /// 推进到下一条评价 (循环)。
    ///
    /// # Returns
    /// 推进后的序号。
    pub fn advance(&self) -> usize {
        let next = self.current() % self.count + 1;
        self.render(next);
        self.current.store(next, Ordering::SeqCst);
        next
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// # Summary
    /// 启动自动轮播任务。
    ///
    /// # Logic
    /// 1. 首次触发在一个间隔之后 (初始序号已在构造时渲染)。
    /// 2. 每次触发调用 `advance`。
    ///
    /// # Returns
    /// 后台任务的 `AbortHandle`，页面生命周期内不会主动取消。
    pub fn start_auto_rotate(self: &Arc<Self>) -> AbortHandle {
        let rotator = Arc::clone(self);
        info!(
            "Testimonial rotation started: {} slides every {:?}",
            self.count, self.interval
        );
        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + rotator.interval, rotator.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let index = rotator.advance();
                debug!("Testimonial rotated to {}", index);
            }
        });
        handle.abort_handle()
    }

    fn render(&self, index: usize) {
        for slot in 1..=self.count {
            self.view.set_testimonial_active(slot, false);
            self.view.set_indicator_active(slot, false);
        }
        self.view.set_testimonial_active(index, true);
        self.view.set_indicator_active(index, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpage_core::test_utils::RecordingView;

    fn setup() -> (Arc<TestimonialRotator>, Arc<RecordingView>) {
        let view = Arc::new(RecordingView::new());
        let rotator = Arc::new(TestimonialRotator::new(
            3,
            Duration::from_millis(5000),
            view.clone(),
        ));
        (rotator, view)
    }

    fn assert_single_active(view: &RecordingView, index: usize) {
        let snap = view.snapshot();
        assert_eq!(snap.active_testimonials(), vec![index]);
        assert_eq!(snap.active_indicators(), vec![index]);
    }

    #[test]
    fn test_initial_slide_is_active() {
        let (rotator, view) = setup();
        assert_eq!(rotator.current(), 1);
        assert_single_active(&view, 1);
    }

    #[test]
    fn test_show_and_wraparound() {
        let (rotator, view) = setup();
        rotator.show(3).unwrap();
        assert_single_active(&view, 3);

        assert_eq!(rotator.advance(), 1);
        assert_single_active(&view, 1);
        assert_eq!(rotator.advance(), 2);
        assert_eq!(rotator.advance(), 3);
        assert_eq!(rotator.advance(), 1);
    }

    #[test]
    fn test_show_rejects_out_of_range() {
        let (rotator, view) = setup();
        rotator.show(2).unwrap();

        for bad in [0, 4, usize::MAX] {
            assert_eq!(
                rotator.show(bad),
                Err(WidgetError::IndexOutOfRange { index: bad, count: 3 })
            );
        }
        assert_eq!(rotator.current(), 2);
        assert_single_active(&view, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_rotate_follows_manual_show() {
        let (rotator, view) = setup();
        let handle = rotator.start_auto_rotate();

        tokio::time::sleep(Duration::from_millis(5001)).await;
        assert_eq!(rotator.current(), 2);

        // 手动跳转后，计时器从新序号继续推进
        rotator.show(1).unwrap();
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(rotator.current(), 2);
        assert_single_active(&view, 2);

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(rotator.current(), 1);
        handle.abort();
    }
}
