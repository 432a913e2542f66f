//! 组件基类

use std::any::Any;

/// 组件 trait
///
/// 只有实现了此 trait 的类型才能挂到 [`GameObject`](super::GameObject) 上。
pub trait Component: Any {
    /// 组件类型名，用于日志和错误信息
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
