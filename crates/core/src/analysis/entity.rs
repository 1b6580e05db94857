use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 进度条数量
pub const BAR_COUNT: usize = 3;

/// # Summary
/// 模拟分析的生命周期阶段。
///
/// # Invariants
/// - 每个周期按 `Idle -> Running -> Revealing -> Done -> Idle` 推进，状态机可复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnalysisPhase {
    // 空闲，等待触发
    #[default]
    Idle,
    // 进度动画进行中
    Running,
    // 进度已满，等待展示结果
    Revealing,
    // 结果已展示，等待按钮恢复
    Done,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisPhase::Idle => write!(f, "idle"),
            AnalysisPhase::Running => write!(f, "running"),
            AnalysisPhase::Revealing => write!(f, "revealing"),
            AnalysisPhase::Done => write!(f, "done"),
        }
    }
}

/// # Summary
/// 单次模拟分析会话。
///
/// # Invariants
/// - `stock_code` 为触发时规范化 (trim + 大写) 后的代码，结果区原样回显。
/// - `id` 用于识别延迟任务所属的周期，旧周期的任务不得改写新会话。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub stock_code: String,
    pub phase: AnalysisPhase,
    // 进度动画已累计的毫秒数
    pub elapsed_ms: u32,
    pub started_at: DateTime<Utc>,
}

impl AnalysisSession {
    /// # Summary
    /// 以 Running 状态开启新会话。
    ///
    /// # Arguments
    /// * `stock_code`: 已规范化的股票代码。
    ///
    /// # Returns
    /// 新会话，`elapsed_ms` 为 0。
    pub fn start(stock_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stock_code: stock_code.into(),
            phase: AnalysisPhase::Running,
            elapsed_ms: 0,
            started_at: Utc::now(),
        }
    }
}

/// # Summary
/// 某一时刻三根进度条的填充百分比。
///
/// # Invariants
/// - 每个值都在 [0, 100] 区间。
/// - 随总进度单调不减；总进度达到 100 时三者均为 100。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressFrame {
    pub bars: [f64; BAR_COUNT],
}

impl ProgressFrame {
    /// 全部归零的帧
    pub const EMPTY: ProgressFrame = ProgressFrame {
        bars: [0.0; BAR_COUNT],
    };

    /// # Summary
    /// 根据已用时间计算总进度百分比。
    ///
    /// # Logic
    /// `p = elapsed / duration * 100`，并截断到 [0, 100]。`duration` 为 0 时视为已完成。
    pub fn percent(elapsed_ms: u32, duration_ms: u32) -> f64 {
        if duration_ms == 0 {
            return 100.0;
        }
        (f64::from(elapsed_ms) / f64::from(duration_ms) * 100.0).clamp(0.0, 100.0)
    }

    /// # Summary
    /// 由总进度推导三根进度条的宽度。
    ///
    /// # Logic
    /// 1. 第一根直接跟随总进度。
    /// 2. 第二根在 p > 33 后以 1.5 倍速度填充。
    /// 3. 第三根在 p > 66 后以 3 倍速度填充。
    ///
    /// # Arguments
    /// * `percent`: 总进度，超出 [0, 100] 的值会被截断。
    ///
    /// # Returns
    /// 对应的 `ProgressFrame`。
    pub fn at(percent: f64) -> Self {
        let p = percent.clamp(0.0, 100.0);
        let staged = |start: f64, speed: f64| {
            if p > start {
                ((p - start) * speed).min(100.0)
            } else {
                0.0
            }
        };
        Self {
            bars: [p.min(100.0), staged(33.0, 1.5), staged(66.0, 3.0)],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bars.iter().all(|&bar| bar >= 100.0)
    }
}
