//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 使用示例
//!
//! ```no_run
//! use unitoolz::core::{log, config::LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None)?;
//!
//! tracing::info!(handlers = 3, "Event ready");
//! # Ok::<(), unitoolz::core::UnitoolzError>(())
//! ```

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

use super::config::LogLevel;
use super::error::{Result, UnitoolzError};

/// 事件分发器使用的日志 target
pub const EVENT_TARGET: &str = "unitoolz::event";

/// 工具库核心使用的日志 target
pub const CORE_TARGET: &str = "unitoolz::core";

const DEFAULT_LOG_FILE: &str = "unitoolz.log";

/// 初始化日志系统
///
/// 应在程序开始时调用一次。重复初始化会返回 `UnitoolzError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否同时输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "unitoolz.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::new(level.as_filter());

    let result = if file_output {
        let log_path = log_file_path.unwrap_or(DEFAULT_LOG_FILE);
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let console_layer = fmt::layer()
            .with_target(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| UnitoolzError::Log(e.to_string()))
}

/// 初始化简单的日志系统（仅控制台输出，Info 级别）
pub fn init_simple() -> Result<()> {
    init_logger(LogLevel::Info, false, None)
}

/// 工具库日志 - Info 级别
#[macro_export]
macro_rules! toolz_info {
    ($($arg:tt)*) => {
        tracing::info!(target: $crate::core::log::CORE_TARGET, $($arg)*)
    };
}

/// 工具库日志 - Warn 级别
#[macro_export]
macro_rules! toolz_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::core::log::CORE_TARGET, $($arg)*)
    };
}

/// 工具库日志 - Error 级别
#[macro_export]
macro_rules! toolz_error {
    ($($arg:tt)*) => {
        tracing::error!(target: $crate::core::log::CORE_TARGET, $($arg)*)
    };
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_second_init_is_an_error() {
        // 其他测试可能已经安装了全局 subscriber，所以只断言第二次一定失败
        let _ = init_logger(LogLevel::Warn, false, None);
        assert!(matches!(init_simple(), Err(UnitoolzError::Log(_))));
    }
}
