//! 进程级运行时设置
//!
//! 事件分发器在报告处理器失败时读取这里的设置。未初始化时使用默认值。

use std::sync::OnceLock;

use crate::core::config::{EventConfig, LogLevel};
use crate::core::event::install_panic_hook;

/// 处理器失败的报告方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventReporting {
    pub enabled: bool,
    pub level: LogLevel,
}

impl Default for EventReporting {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Error,
        }
    }
}

impl EventReporting {
    /// 处理器失败应使用的日志级别，关闭报告时返回 `None`
    pub fn failure_level(&self) -> Option<LogLevel> {
        self.enabled.then_some(self.level)
    }
}

static EVENT_REPORTING: OnceLock<EventReporting> = OnceLock::new();

/// 根据配置设置处理器失败的报告方式
///
/// 只有第一次调用生效，返回值表示本次调用是否生效。
/// 同时安装 [`install_panic_hook`]，处理器中的 panic 只通过日志报告。
pub fn init_event_reporting(config: &EventConfig) -> bool {
    install_panic_hook();

    let reporting = EventReporting {
        enabled: config.report_failures,
        level: config.failure_level,
    };

    EVENT_REPORTING.set(reporting).is_ok()
}

pub fn event_reporting() -> EventReporting {
    EVENT_REPORTING.get().copied().unwrap_or_default()
}
