//! # `stockpage-core` - 领域核心
//!
//! 推广页交互层的实体、错误枚举与端口 (Trait) 定义。
//! 具体实现分布在 `stockpage-widgets` 与 `stockpage-links` 中，
//! 由 `stockpage-app` 的 DI 容器组装。

pub mod analysis;
pub mod common;
pub mod config;
pub mod redirect;
pub mod view;

#[cfg(feature = "test-utils")]
pub mod test_utils;
