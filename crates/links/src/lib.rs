//! # `stockpage-links` - 跳转地址解析
//!
//! 启动时向后台拉取一次分流链接，供行动按钮在点击时读取；
//! 拉取失败或尚未完成时退回固定的站内路径。

pub mod cta;
pub mod http;
pub mod resolver;
