//! 可渲染组件

use super::Component;
use crate::math::{Bounds, Vector3};

/// 网格渲染器
///
/// 只携带局部空间包围盒，世界空间包围盒由所在对象的世界矩阵变换得到。
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRenderer {
    /// 局部空间包围盒
    pub local_bounds: Bounds,
}

impl MeshRenderer {
    pub fn new(local_bounds: Bounds) -> Self {
        Self { local_bounds }
    }

    /// 以原点为中心、边长为 1 的立方体
    pub fn unit_cube() -> Self {
        Self::new(Bounds::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)))
    }
}

impl Component for MeshRenderer {}
