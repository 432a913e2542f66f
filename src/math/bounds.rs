//! 轴对齐包围盒
//!
//! 以中心点和半尺寸（extents）表示，提供包含点/包围盒的扩展和矩阵变换。

use super::{Matrix4, Point3, Vector3};

/// 轴对齐包围盒（AABB）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// 中心点
    pub center: Vector3,
    /// 半尺寸，各分量非负
    pub extents: Vector3,
}

impl Bounds {
    /// 由中心点和完整尺寸创建
    pub fn new(center: Vector3, size: Vector3) -> Self {
        Self {
            center,
            extents: size.abs() * 0.5,
        }
    }

    /// 由最小点和最大点创建
    pub fn from_min_max(min: Vector3, max: Vector3) -> Self {
        let min_corner = min.inf(&max);
        let max_corner = min.sup(&max);
        Self {
            center: (min_corner + max_corner) * 0.5,
            extents: (max_corner - min_corner) * 0.5,
        }
    }

    /// 包含单个点、尺寸为零的包围盒
    pub fn from_point(point: Vector3) -> Self {
        Self {
            center: point,
            extents: Vector3::zeros(),
        }
    }

    pub fn min(&self) -> Vector3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vector3 {
        self.center + self.extents
    }

    /// 完整尺寸
    pub fn size(&self) -> Vector3 {
        self.extents * 2.0
    }

    /// 扩展到包含指定点
    pub fn encapsulate_point(&mut self, point: Vector3) {
        *self = Self::from_min_max(self.min().inf(&point), self.max().sup(&point));
    }

    /// 扩展到包含另一个包围盒
    pub fn encapsulate(&mut self, other: &Bounds) {
        *self = Self::from_min_max(self.min().inf(&other.min()), self.max().sup(&other.max()));
    }

    /// 点是否在包围盒内（含边界）
    pub fn contains(&self, point: &Vector3) -> bool {
        let min = self.min();
        let max = self.max();
        (0..3).all(|i| point[i] >= min[i] && point[i] <= max[i])
    }

    /// 8 个角点
    pub fn corners(&self) -> [Vector3; 8] {
        let min = self.min();
        let max = self.max();
        [
            Vector3::new(min.x, min.y, min.z),
            Vector3::new(max.x, min.y, min.z),
            Vector3::new(min.x, max.y, min.z),
            Vector3::new(max.x, max.y, min.z),
            Vector3::new(min.x, min.y, max.z),
            Vector3::new(max.x, min.y, max.z),
            Vector3::new(min.x, max.y, max.z),
            Vector3::new(max.x, max.y, max.z),
        ]
    }

    /// 用矩阵变换包围盒
    ///
    /// 返回包含 8 个变换后角点的最小轴对齐包围盒。
    pub fn transformed(&self, matrix: &Matrix4) -> Bounds {
        let corners = self
            .corners()
            .map(|corner| matrix.transform_point(&Point3::from(corner)).coords);

        let mut bounds = Bounds::from_point(corners[0]);
        for corner in &corners[1..] {
            bounds.encapsulate_point(*corner);
        }
        bounds
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_point(Vector3::zeros())
    }
}
