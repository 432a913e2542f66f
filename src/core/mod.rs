//! 核心功能模块
//!
//! 本模块提供工具库的基础设施：带保护的多播事件、日志系统、配置管理和错误处理。
//!
//! # 模块组织
//!
//! - `event`：事件系统，按注册顺序调用处理器并隔离处理器中的 panic
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载日志和事件设置
//! - `runtime`：进程级运行时设置（事件失败的报告方式）
//! - `error`：错误处理，定义统一的错误类型

pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod runtime;

// 重新导出常用类型，方便使用
pub use config::{Config, LogLevel};
pub use error::{ConfigError, Result, UnitoolzError};
pub use event::{
    install_panic_hook, DispatchReport, Event, Event0, Event1, Event2, EventHandler, HandlerFailure,
    HandlerId, PropertyChanged, PropertyChangedEvent, SafeInvoke,
};
