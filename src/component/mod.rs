//! 组件系统模块
//!
//! 提供 GameObject、Transform、MeshRenderer 等组件，以及在对象层级上工作的辅助函数：
//!
//! - `lookup`：按名称在子对象中查找组件
//! - `bounds`：汇总层级中所有渲染器的包围盒

mod component;
mod transform;
mod game_object;
mod renderer;
mod lookup;
mod bounds;

pub use component::Component;
pub use transform::{Space, Transform};
pub use game_object::GameObject;
pub use renderer::MeshRenderer;
