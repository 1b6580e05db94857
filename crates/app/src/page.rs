//! # 页面事件分发
//!
//! 持有全部组件的状态对象，把用户界面事件路由到对应组件。
//! 任何组件错误都在这里降级处理，不会中断页面。

use std::str::FromStr;
use std::sync::Arc;
use stockpage_core::analysis::error::AnalysisError;
use stockpage_core::config::AppConfig;
use stockpage_core::redirect::port::LinkSource;
use stockpage_core::view::port::{
    AnalysisView, ConversionReporter, CounterView, Navigator, SuggestionView, TestimonialView,
};
use stockpage_links::cta::CallToAction;
use stockpage_links::resolver::RedirectResolver;
use stockpage_widgets::analysis::AnalysisSimulator;
use stockpage_widgets::autocomplete::AutocompleteController;
use stockpage_widgets::catalog::SymbolCatalog;
use stockpage_widgets::counter::CounterAnimator;
use stockpage_widgets::testimonial::TestimonialRotator;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, warn};

/// # Summary
/// 页面可消费的用户界面事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    // 搜索框文本变化
    Input(String),
    // 点击建议项
    Pick(String),
    // 文档任意位置点击
    DocumentClick { inside_input_group: bool },
    // 点击分析按钮
    Analyze,
    // 点击弹窗区域
    ModalClick { on_backdrop: bool },
    // 点击行动按钮
    CallToAction,
    // 点击评价位置指示点
    Indicator(usize),
    Quit,
}

impl FromStr for PageEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (command, arg) = match s.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (s, ""),
        };
        match (command.to_lowercase().as_str(), arg) {
            ("input", text) => Ok(PageEvent::Input(text.to_string())),
            ("pick", symbol) if !symbol.is_empty() => Ok(PageEvent::Pick(symbol.to_string())),
            ("click", "inside") => Ok(PageEvent::DocumentClick {
                inside_input_group: true,
            }),
            ("click", "outside") => Ok(PageEvent::DocumentClick {
                inside_input_group: false,
            }),
            ("analyze", "") => Ok(PageEvent::Analyze),
            ("backdrop", "") => Ok(PageEvent::ModalClick { on_backdrop: true }),
            ("modal", "") => Ok(PageEvent::ModalClick { on_backdrop: false }),
            ("cta", "") => Ok(PageEvent::CallToAction),
            ("dot", n) => n
                .parse()
                .map(PageEvent::Indicator)
                .map_err(|_| format!("Invalid indicator index: {}", n)),
            ("quit" | "exit", "") => Ok(PageEvent::Quit),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// 分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

/// # Summary
/// 页面启动后常驻的后台任务。
pub struct PageTasks {
    pub counter: AbortHandle,
    pub rotation: AbortHandle,
    pub resolve: JoinHandle<Option<String>>,
}

impl PageTasks {
    /// 进程退出前终止所有常驻任务。
    pub fn shutdown(self) {
        self.counter.abort();
        self.rotation.abort();
        self.resolve.abort();
    }
}

/// # Summary
/// 页面聚合根，持有各组件的显式状态对象。
///
/// # Invariants
/// - 组件之间不直接引用；分析按钮在点击时读取搜索框文本，行动按钮在点击时读取解析结果。
pub struct Page {
    config: AppConfig,
    autocomplete: AutocompleteController,
    rotator: Arc<TestimonialRotator>,
    counter: Arc<CounterAnimator>,
    simulator: Arc<AnalysisSimulator>,
    resolver: Arc<RedirectResolver>,
    cta: CallToAction,
}

impl Page {
    /// # Summary
    /// 组装页面。
    ///
    /// # Arguments
    /// * `config`: 应用配置。
    /// * `source`: 分流链接数据源。
    /// * `view`: 同时实现全部渲染端口的视图。
    pub fn new<V>(config: AppConfig, source: Arc<dyn LinkSource>, view: Arc<V>) -> Self
    where
        V: SuggestionView
            + TestimonialView
            + CounterView
            + AnalysisView
            + Navigator
            + ConversionReporter
            + 'static,
    {
        let autocomplete = AutocompleteController::new(
            Arc::new(SymbolCatalog::popular()),
            view.clone(),
        );
        let rotator = Arc::new(TestimonialRotator::new(
            config.testimonial.count,
            config.testimonial.interval(),
            view.clone(),
        ));
        let counter = Arc::new(CounterAnimator::new(
            config.counter.interval(),
            config.counter.max_delta,
            view.clone(),
        ));
        let simulator = Arc::new(AnalysisSimulator::new(config.analysis.clone(), view.clone()));
        let resolver = Arc::new(RedirectResolver::new(source));
        let cta = CallToAction::new(
            resolver.clone(),
            view.clone(),
            view,
            config.redirect.fallback_path.clone(),
        );

        Self {
            config,
            autocomplete,
            rotator,
            counter,
            simulator,
            resolver,
            cta,
        }
    }

    /// # Summary
    /// 页面就绪。
    ///
    /// # Logic
    /// 1. 启动计数器与评价轮播 (无条件)。
    /// 2. 后台发起一次跳转地址解析，不等待其完成。
    pub fn start(&self) -> PageTasks {
        info!("Page ready");
        PageTasks {
            counter: self.counter.start(self.config.counter.initial_value),
            rotation: self.rotator.start_auto_rotate(),
            resolve: self.resolver.spawn_resolve(),
        }
    }

    /// # Summary
    /// 把一个界面事件路由到对应组件。
    ///
    /// # Logic
    /// 组件返回的错误按类别降级：校验失败已由组件提示用户，其余只记录日志。
    pub fn dispatch(&self, event: PageEvent) -> Dispatch {
        debug!("Dispatching {:?}", event);
        match event {
            PageEvent::Input(text) => self.autocomplete.on_input(&text),
            PageEvent::Pick(symbol) => {
                if let Err(e) = self.autocomplete.select(&symbol) {
                    warn!("Suggestion click ignored: {}", e);
                }
            }
            PageEvent::DocumentClick { inside_input_group } => {
                self.autocomplete.on_document_click(inside_input_group)
            }
            PageEvent::Analyze => match self.simulator.trigger(&self.autocomplete.input_text()) {
                Ok(_) => {}
                Err(AnalysisError::Validation(msg)) => debug!("Analysis not started: {}", msg),
                Err(e @ AnalysisError::ConcurrentTrigger(_)) => error!("{}", e),
            },
            PageEvent::ModalClick { on_backdrop } => {
                self.simulator.on_modal_click(on_backdrop);
            }
            PageEvent::CallToAction => {
                self.cta.on_click();
            }
            PageEvent::Indicator(index) => {
                if let Err(e) = self.rotator.show(index) {
                    warn!("Indicator click ignored: {}", e);
                }
            }
            PageEvent::Quit => return Dispatch::Quit,
        }
        Dispatch::Continue
    }
}

#[cfg(test)]
impl Page {
    pub fn autocomplete(&self) -> &AutocompleteController {
        &self.autocomplete
    }

    pub fn rotator(&self) -> &TestimonialRotator {
        &self.rotator
    }

    pub fn counter(&self) -> &CounterAnimator {
        &self.counter
    }

    pub fn simulator(&self) -> &AnalysisSimulator {
        &self.simulator
    }

    pub fn resolver(&self) -> &RedirectResolver {
        &self.resolver
    }
}
