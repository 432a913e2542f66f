//! Unitoolz - 游戏运行时通用工具库
//!
//! 为基于组件的场景层级提供一组常用工具，核心是带保护的多播事件。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（事件、日志、配置、错误处理）
//! - `text`: `{key}` 模板替换
//! - `component`: GameObject 层级、按名称查找组件、包围盒汇总
//! - `math`: 向量类型、包围盒和二维角度工具
//!
//! # 使用示例
//!
//! ```
//! use unitoolz::core::event::*;
//!
//! let on_score: Event1<u32> = Event::new();
//! on_score.subscribe("Hud::update_score", |score| println!("score: {}", score));
//! on_score.subscribe("Achievements::check", |_| panic!("save file locked"));
//!
//! // 出错的处理器被记录并跳过，分发继续
//! let report = on_score.dispatch(&120);
//! assert_eq!(report.failed_labels(), vec!["Achievements::check"]);
//! ```

pub mod core;
pub mod math;
pub mod component;
pub mod text;
