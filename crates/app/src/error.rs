use stockpage_core::config::InvalidConfig;
use stockpage_core::redirect::error::RedirectError;
use thiserror::Error;

/// # Summary
/// 应用启动与事件循环的错误类型。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Config error: {0}")]
    InvalidConfig(#[from] InvalidConfig),
    #[error("Redirect error: {0}")]
    Redirect(#[from] RedirectError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
