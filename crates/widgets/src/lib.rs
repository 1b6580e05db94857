//! # `stockpage-widgets` - 页面交互组件
//!
//! 每个组件独占自身状态，对外暴露查询/命令方法，
//! 通过 `stockpage-core` 中的渲染端口输出可见结果。

pub mod analysis;
pub mod autocomplete;
pub mod catalog;
pub mod counter;
pub mod format;
pub mod testimonial;
