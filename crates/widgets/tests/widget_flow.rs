use std::sync::Arc;
use std::time::Duration;
use stockpage_core::analysis::entity::AnalysisPhase;
use stockpage_core::analysis::error::AnalysisError;
use stockpage_core::config::AppConfig;
use stockpage_core::test_utils::RecordingView;
use stockpage_widgets::analysis::AnalysisSimulator;
use stockpage_widgets::autocomplete::{AutocompleteController, SuggestionState};
use stockpage_widgets::catalog::SymbolCatalog;
use stockpage_widgets::counter::CounterAnimator;
use stockpage_widgets::testimonial::TestimonialRotator;

/// # Summary
/// 集成测试：从搜索框选中代码后触发分析，结果区回显选中的代码。
///
/// # Logic
/// 1. 输入 "app"，建议列表打开并包含 AAPL。
/// 2. 选中 AAPL，输入框被覆盖为 "AAPL"。
/// 3. 以输入框文本触发分析，等待一个完整周期。
/// 4. 断言结果区显示 "AAPL" 且按钮已恢复。
#[tokio::test(start_paused = true)]
async fn test_select_then_analyze() -> anyhow::Result<()> {
    let config = AppConfig::default();
    let view = Arc::new(RecordingView::new());
    let autocomplete = AutocompleteController::new(Arc::new(SymbolCatalog::popular()), view.clone());
    let simulator = Arc::new(AnalysisSimulator::new(config.analysis.clone(), view.clone()));

    autocomplete.on_input("app");
    assert_eq!(autocomplete.state(), SuggestionState::Open);
    autocomplete.select("AAPL")?;
    assert_eq!(autocomplete.state(), SuggestionState::Closed);

    simulator.trigger(&autocomplete.input_text())?;
    assert_eq!(simulator.phase(), AnalysisPhase::Running);

    tokio::time::sleep(Duration::from_millis(2001)).await;
    let snap = view.snapshot();
    assert_eq!(snap.result_text.as_deref(), Some("AAPL"));
    assert!(snap.trigger_enabled);
    assert_eq!(simulator.phase(), AnalysisPhase::Idle);
    Ok(())
}

/// # Summary
/// 集成测试：分析只读取触发时刻的输入文本，与建议列表状态无关。
#[tokio::test(start_paused = true)]
async fn test_analysis_ignores_suggestion_state() -> anyhow::Result<()> {
    let view = Arc::new(RecordingView::new());
    let autocomplete = AutocompleteController::new(Arc::new(SymbolCatalog::popular()), view.clone());
    let simulator = Arc::new(AnalysisSimulator::new(
        AppConfig::default().analysis,
        view.clone(),
    ));

    // 未知代码没有建议，但依然可以分析
    autocomplete.on_input("brk.b");
    assert_eq!(autocomplete.state(), SuggestionState::Closed);
    simulator.trigger(&autocomplete.input_text())?;

    // 分析过程中继续输入不影响正在进行的会话
    autocomplete.on_input("");
    let err = simulator.trigger(&autocomplete.input_text());
    assert_eq!(err, Err(AnalysisError::ConcurrentTrigger("BRK.B".to_string())));
    assert!(view.snapshot().alerts.is_empty());

    tokio::time::sleep(Duration::from_millis(1801)).await;
    assert_eq!(view.snapshot().result_text.as_deref(), Some("BRK.B"));
    Ok(())
}

/// # Summary
/// 集成测试：计数器与轮播计时器在分析进行期间互不干扰。
#[tokio::test(start_paused = true)]
async fn test_independent_timers() -> anyhow::Result<()> {
    let config = AppConfig::default();
    let view = Arc::new(RecordingView::new());
    let counter = Arc::new(CounterAnimator::new(
        config.counter.interval(),
        config.counter.max_delta,
        view.clone(),
    ));
    let rotator = Arc::new(TestimonialRotator::new(
        config.testimonial.count,
        config.testimonial.interval(),
        view.clone(),
    ));
    let simulator = Arc::new(AnalysisSimulator::new(config.analysis.clone(), view.clone()));

    let counter_task = counter.start(config.counter.initial_value);
    let rotate_task = rotator.start_auto_rotate();

    tokio::time::sleep(Duration::from_millis(4000)).await;
    simulator.trigger("META")?;
    tokio::time::sleep(Duration::from_millis(2001)).await;

    assert_eq!(rotator.current(), 2);
    assert!(counter.value() >= config.counter.initial_value);
    assert_eq!(view.snapshot().counter_renders, 2);
    assert_eq!(view.snapshot().result_text.as_deref(), Some("META"));

    counter_task.abort();
    rotate_task.abort();
    Ok(())
}
