use std::sync::{Arc, Mutex, MutexGuard};
use stockpage_core::analysis::entity::{AnalysisPhase, AnalysisSession, ProgressFrame};
use stockpage_core::analysis::error::AnalysisError;
use stockpage_core::config::AnalysisConfig;
use stockpage_core::view::port::AnalysisView;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 股票代码为空时的阻塞提示
pub const EMPTY_CODE_MESSAGE: &str = "Please enter a stock symbol";

/// 模拟器可变状态，统一由一把锁保护
struct SimulatorState {
    // 当前会话，None 表示 Idle
    session: Option<AnalysisSession>,
    // 触发按钮是否可用，唯一的互斥标志
    trigger_enabled: bool,
    // 触发按钮当前文字
    label: String,
    modal_visible: bool,
    // 进度计时任务句柄及其所属会话，进度满 100% 时由该会话的任务清除
    progress_task: Option<(Uuid, AbortHandle)>,
    // 已启动的周期数
    cycles_started: u64,
}

/// # Summary
/// 模拟分析状态机：锁定按钮 → 进度动画 → 展示结果 → 解锁按钮。
///
/// # Invariants
/// - 按钮禁用标志在进度计时器启动前置位，只由延迟恢复任务清除，保证同一时刻至多一个周期。
/// - 进度计时器在总进度达到 100% 的那一刻停止。
/// - 结果展示 (进度完成后延迟) 与按钮恢复 (触发后延迟) 各自独立计时。
pub struct AnalysisSimulator {
    config: AnalysisConfig,
    view: Arc<dyn AnalysisView>,
    state: Mutex<SimulatorState>,
}

impl AnalysisSimulator {
    /// # Summary
    /// 创建模拟器并渲染空闲状态的触发按钮。
    ///
    /// # Arguments
    /// * `config`: 时序参数。
    /// * `view`: 渲染端口。
    pub fn new(config: AnalysisConfig, view: Arc<dyn AnalysisView>) -> Self {
        view.set_trigger(true, &config.idle_label);
        let label = config.idle_label.clone();
        Self {
            config,
            view,
            state: Mutex::new(SimulatorState {
                session: None,
                trigger_enabled: true,
                label,
                modal_visible: false,
                progress_task: None,
                cycles_started: 0,
            }),
        }
    }

    /// # Summary
    /// 触发一次模拟分析。
    ///
    /// # Logic
    /// 1. 按钮已禁用时返回 `ConcurrentTrigger`，仅记录日志，不做任何渲染。
    /// 2. 规范化代码 (trim + 大写)，为空则弹出阻塞提示并返回 `Validation`。
    /// 3. 禁用按钮并切换文字，显示弹窗与进度区，隐藏结果区，进度条归零。
    /// 4. 启动进度计时任务与独立的按钮恢复任务。
    ///
    /// # Arguments
    /// * `raw_code`: 输入框中的原始文本。
    ///
    /// # Returns
    /// 成功返回新会话的 id。
    pub fn trigger(self: &Arc<Self>, raw_code: &str) -> Result<Uuid, AnalysisError> {
        let code = raw_code.trim().to_uppercase();

        let mut state = self.lock();
        // 禁用中的按钮不响应点击，先于输入校验
        if !state.trigger_enabled {
            let running = state
                .session
                .as_ref()
                .map(|s| s.stock_code.clone())
                .unwrap_or_default();
            error!(
                "Analysis triggered while the control is disabled (running: {:?}, requested: {})",
                running, code
            );
            return Err(AnalysisError::ConcurrentTrigger(running));
        }

        if code.is_empty() {
            self.view.alert(EMPTY_CODE_MESSAGE);
            info!("Analysis trigger rejected: empty stock code");
            return Err(AnalysisError::Validation(EMPTY_CODE_MESSAGE.to_string()));
        }

        // 1. 锁定按钮
        state.trigger_enabled = false;
        let original_label = std::mem::replace(&mut state.label, self.config.busy_label.clone());
        self.view.set_trigger(false, &self.config.busy_label);

        // 2. 重置弹窗
        state.modal_visible = true;
        self.view.set_modal_visible(true);
        self.view.set_progress_visible(true);
        self.view.set_result_visible(false);
        self.view.render_progress(&ProgressFrame::EMPTY);

        let session = AnalysisSession::start(code.clone());
        let id = session.id;
        state.session = Some(session);
        state.cycles_started += 1;
        info!("Analysis {} started for {}", id, code);

        // 3. 进度计时
        if let Some((_, stale)) = state.progress_task.take() {
            debug!("Aborting progress timer left over from a previous cycle");
            stale.abort();
        }
        let progress = tokio::spawn(Arc::clone(self).run_progress(id, code));
        state.progress_task = Some((id, progress.abort_handle()));

        // 4. 按钮恢复，从触发时刻独立计时
        tokio::spawn(Arc::clone(self).reenable_after_delay(id, original_label));

        Ok(id)
    }

    /// # Summary
    /// 处理弹窗区域的点击。
    ///
    /// # Logic
    /// 仅当点击目标是遮罩本身时关闭弹窗，点击内容区不做处理。分析周期不受影响。
    ///
    /// # Returns
    /// 弹窗是否被关闭。
    pub fn on_modal_click(&self, on_backdrop: bool) -> bool {
        if !on_backdrop {
            return false;
        }
        let mut state = self.lock();
        state.modal_visible = false;
        self.view.set_modal_visible(false);
        true
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.lock()
            .session
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(AnalysisPhase::Idle)
    }

    pub fn session(&self) -> Option<AnalysisSession> {
        self.lock().session.clone()
    }

    pub fn is_trigger_enabled(&self) -> bool {
        self.lock().trigger_enabled
    }

    pub fn trigger_label(&self) -> String {
        self.lock().label.clone()
    }

    pub fn is_modal_visible(&self) -> bool {
        self.lock().modal_visible
    }

    /// 进度计时器是否仍在运行。
    pub fn is_progress_running(&self) -> bool {
        self.lock()
            .progress_task
            .as_ref()
            .is_some_and(|(_, task)| !task.is_finished())
    }

    pub fn cycles_started(&self) -> u64 {
        self.lock().cycles_started
    }

    /// # Summary
    /// 进度计时任务。
    ///
    /// # Logic
    /// 1. 每个 tick 累加已用时间并计算三根进度条。
    /// 2. 总进度达到 100% 时退出循环，计时器随之释放。
    /// 3. 进入 Revealing，并调度结果展示。
    async fn run_progress(self: Arc<Self>, id: Uuid, code: String) {
        let tick = self.config.tick();
        let mut ticker = tokio::time::interval_at(Instant::now() + tick, tick);
        let mut elapsed_ms: u32 = 0;

        loop {
            ticker.tick().await;
            elapsed_ms = elapsed_ms.saturating_add(self.config.tick_ms);
            let percent = ProgressFrame::percent(elapsed_ms, self.config.duration_ms);
            let frame = ProgressFrame::at(percent);

            {
                let mut state = self.lock();
                if let Some(session) = state.session.as_mut().filter(|s| s.id == id) {
                    session.elapsed_ms = elapsed_ms;
                }
            }
            self.view.render_progress(&frame);

            if percent >= 100.0 {
                break;
            }
        }
        drop(ticker);

        {
            let mut state = self.lock();
            if state
                .progress_task
                .as_ref()
                .is_some_and(|(owner, _)| *owner == id)
            {
                state.progress_task = None;
            }
            if let Some(session) = state
                .session
                .as_mut()
                .filter(|s| s.id == id && s.phase == AnalysisPhase::Running)
            {
                session.phase = AnalysisPhase::Revealing;
            }
        }
        debug!("Analysis {} progress complete after {}ms", id, elapsed_ms);

        tokio::spawn(self.reveal_after_delay(id, code));
    }

    /// # Summary
    /// 延迟展示结果。
    ///
    /// # Logic
    /// 1. 等待 `reveal_delay`。
    /// 2. 若已有更新的周期开始则放弃渲染。
    /// 3. 隐藏进度区，显示结果区并原样写入代码，会话进入 Done。
    async fn reveal_after_delay(self: Arc<Self>, id: Uuid, code: String) {
        tokio::time::sleep(self.config.reveal_delay()).await;

        let mut state = self.lock();
        if state.session.as_ref().is_some_and(|s| s.id != id) {
            warn!("Analysis {} result discarded: a newer cycle is running", id);
            return;
        }
        self.view.set_progress_visible(false);
        self.view.set_result_visible(true);
        self.view.render_result(&code);
        if let Some(session) = state.session.as_mut() {
            session.phase = AnalysisPhase::Done;
        }
        info!("Analysis {} revealed for {}", id, code);
    }

    /// # Summary
    /// 延迟恢复触发按钮。
    ///
    /// # Logic
    /// 1. 等待 `reenable_delay` (自触发时刻起计时)。
    /// 2. 恢复按钮可用状态与原文字，会话重置为 Idle。
    async fn reenable_after_delay(self: Arc<Self>, id: Uuid, original_label: String) {
        tokio::time::sleep(self.config.reenable_delay()).await;

        let mut state = self.lock();
        state.trigger_enabled = true;
        self.view.set_trigger(true, &original_label);
        state.label = original_label;
        if let Some(session) = state.session.take() {
            if session.phase != AnalysisPhase::Done {
                debug!(
                    "Analysis {} re-enabled before its result was revealed (phase {})",
                    id, session.phase
                );
            }
        }
        info!("Analysis {} finished, trigger re-enabled", id);
    }

    fn lock(&self) -> MutexGuard<'_, SimulatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
