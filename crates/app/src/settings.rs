use crate::error::AppError;
use config::{Config, Environment, File};
use stockpage_core::config::AppConfig;
use tracing::info;

/// 环境变量前缀，例如 `STOCKPAGE__REDIRECT__ENDPOINT`
const ENV_PREFIX: &str = "STOCKPAGE";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 为底 (各字段均带 serde 默认值)。
/// 2. 叠加可选的配置文件 (扩展名自动识别，文件缺失时跳过)。
/// 3. 叠加 `STOCKPAGE__SECTION__KEY` 形式的环境变量。
/// 4. 校验取值，计时间隔等为 0 时拒绝启动。
///
/// # Arguments
/// * `path`: 配置文件路径，可省略扩展名。
///
/// # Returns
/// 合并后的 `AppConfig`。
pub fn load_config(path: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;
    config.validate()?;

    info!(
        "Config loaded: endpoint={}, fallback={}",
        config.redirect.endpoint, config.redirect.fallback_path
    );
    Ok(config)
}
