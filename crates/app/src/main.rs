mod console;
mod error;
mod page;
mod settings;

use std::sync::Arc;

use crate::console::ConsoleView;
use crate::error::AppError;
use crate::page::{Dispatch, Page, PageEvent};
use stockpage_links::http::HttpLinkSource;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 未指定配置文件时的默认路径 (扩展名自动识别)
const DEFAULT_CONFIG: &str = "stockpage";

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化链接数据源与终端视图，并通过 Arc<dyn Trait> 注入到页面。
///
/// # Logic
/// 1. 初始化全局日志 (非阻塞写入 stderr)。
/// 2. 加载配置。
/// 3. 实例化基础设施层 (HTTP 链接数据源、终端视图)。
/// 4. 组装页面并启动常驻任务。
/// 5. 逐行读取标准输入作为界面事件，直到 `quit`、输入结束或外部信号。
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // 1. 初始化日志
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();
    info!("Stock page starting...");

    // 2. 加载配置
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = settings::load_config(&path)?;

    // 3. 实例化基础设施层
    let source = Arc::new(HttpLinkSource::new(
        config.redirect.endpoint.clone(),
        config.redirect.timeout(),
    )?);
    let view = Arc::new(ConsoleView::new());

    // 4. 组装页面
    let page = Page::new(config, source, view);
    let tasks = page.start();

    // 5. 事件循环
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<PageEvent>() {
                    Ok(event) => {
                        if page.dispatch(event) == Dispatch::Quit {
                            break;
                        }
                    }
                    Err(e) => warn!("{}", e),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Shutdown signal received");
                break;
            }
        }
    }

    tasks.shutdown();
    info!("Stock page stopped");
    Ok(())
}
