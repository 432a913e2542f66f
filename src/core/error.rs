//! 错误处理模块
//!
//! 定义了工具库中使用的统一错误类型。
//!
//! # 错误分层
//!
//! - 调用方的编程错误（层级中没有渲染器、按名称查找不到组件等）立即以 `Err` 返回，不做重试
//! - 事件处理器内部的 panic 由事件分发器隔离并记录，不会出现在这里

use std::fmt;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, UnitoolzError>;

/// Unitoolz 的错误类型
#[derive(Debug)]
pub enum UnitoolzError {
    /// 配置错误
    Config(ConfigError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),

    /// 层级下没有任何可渲染对象，无法计算包围盒
    EmptyBounds { root: String },

    /// 按名称查找组件失败
    ComponentNotFound {
        component: &'static str,
        name: String,
    },

    /// 变换矩阵不可逆（例如缩放分量为 0）
    DegenerateTransform { object: String },
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for UnitoolzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitoolzError::Config(e) => write!(f, "Configuration error: {}", e),
            UnitoolzError::Io(e) => write!(f, "IO error: {}", e),
            UnitoolzError::Log(msg) => write!(f, "Log error: {}", msg),
            UnitoolzError::EmptyBounds { root } => write!(
                f,
                "Cannot calculate bounds of '{}': it does not contain at least one renderer",
                root
            ),
            UnitoolzError::ComponentNotFound { component, name } => {
                write!(f, "No component of type {} found on an object named '{}'", component, name)
            }
            UnitoolzError::DegenerateTransform { object } => {
                write!(f, "Transform of '{}' is not invertible", object)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for UnitoolzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UnitoolzError::Io(e) => Some(e),
            UnitoolzError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for UnitoolzError {
    fn from(err: std::io::Error) -> Self {
        UnitoolzError::Io(err)
    }
}

impl From<ConfigError> for UnitoolzError {
    fn from(err: ConfigError) -> Self {
        UnitoolzError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_message_names_root() {
        let err = UnitoolzError::EmptyBounds { root: "Ship".to_string() };
        assert!(err.to_string().contains("'Ship'"));
    }

    #[test]
    fn test_config_error_is_source() {
        use std::error::Error;

        let err: UnitoolzError = ConfigError::ParseError("bad".to_string()).into();
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Configuration error: Failed to parse config: bad");
    }
}
