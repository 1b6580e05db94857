use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 配置项取值非法
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid config `{key}`: {reason}")]
pub struct InvalidConfig {
    pub key: &'static str,
    pub reason: &'static str,
}

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub counter: CounterConfig,
    pub testimonial: TestimonialConfig,
    pub analysis: AnalysisConfig,
    pub redirect: RedirectConfig,
}

/// 访客计数器动画参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub initial_value: u64,
    pub interval_ms: u64,
    // 每次递增的上限 (含)
    pub max_delta: u64,
}

/// 用户评价轮播参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialConfig {
    pub count: usize,
    pub interval_ms: u64,
}

/// # Summary
/// 模拟分析流程的时序参数。
///
/// # Invariants
/// - `tick_ms` 与 `duration_ms` 必须大于 0。
/// - `reveal_delay_ms` 与 `reenable_delay_ms` 均从触发时刻起独立计时，互不链式依赖。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub tick_ms: u32,
    pub duration_ms: u32,
    pub reveal_delay_ms: u32,
    pub reenable_delay_ms: u32,
    // 分析进行中按钮显示的文字
    pub busy_label: String,
    // 空闲状态按钮文字
    pub idle_label: String,
}

/// 跳转地址解析参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    pub endpoint: String,
    pub fallback_path: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// # Summary
    /// 校验会被计时器或取模直接使用的取值。
    ///
    /// # Logic
    /// 所有计时间隔、评价条数与请求超时必须大于 0，否则后台任务会在运行时崩溃。
    ///
    /// # Returns
    /// 遇到的第一个非法项。
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let checks = [
            ("counter.interval_ms", self.counter.interval_ms > 0),
            ("testimonial.count", self.testimonial.count > 0),
            ("testimonial.interval_ms", self.testimonial.interval_ms > 0),
            ("analysis.tick_ms", self.analysis.tick_ms > 0),
            ("analysis.duration_ms", self.analysis.duration_ms > 0),
            ("redirect.timeout_secs", self.redirect.timeout_secs > 0),
        ];
        match checks.iter().find(|(_, ok)| !*ok) {
            Some((key, _)) => Err(InvalidConfig {
                key: *key,
                reason: "must be greater than 0",
            }),
            None => Ok(()),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial_value: 4861,
            interval_ms: 5000,
            max_delta: 2,
        }
    }
}

impl CounterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for TestimonialConfig {
    fn default() -> Self {
        Self {
            count: 3,
            interval_ms: 5000,
        }
    }
}

impl TestimonialConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tick_ms: 30,
            duration_ms: 1500,
            reveal_delay_ms: 300,
            reenable_delay_ms: 2000,
            busy_label: "Analyzing...".to_string(),
            idle_label: "Analyze".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.reveal_delay_ms))
    }

    pub fn reenable_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.reenable_delay_ms))
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8016/api/get-links".to_string(),
            fallback_path: "/admin".to_string(),
            timeout_secs: 10,
        }
    }
}

impl RedirectConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
