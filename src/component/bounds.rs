//! 层级包围盒汇总
//!
//! 汇总对象自身及所有激活后代上 [`MeshRenderer`] 的世界空间包围盒。
//! 根对象的位置本身不参与计算，只有渲染器的包围盒会被合并。

use super::{GameObject, MeshRenderer, Space};
use crate::core::error::{Result, UnitoolzError};
use crate::core::log::CORE_TARGET;
use crate::math::{Bounds, Point3, Vector3};

impl GameObject {
    /// 计算层级中所有激活渲染器的世界空间包围盒
    ///
    /// # 错误
    /// 层级中没有任何激活的渲染器时返回 `EmptyBounds`
    pub fn calculate_bounds_recursive(&self) -> Result<Bounds> {
        let mut combined: Option<Bounds> = None;
        let mut renderers = 0usize;

        self.visit(false, &mut |go, world| {
            for renderer in go.components_of::<MeshRenderer>() {
                let world_bounds = renderer.local_bounds.transformed(world);
                combined.get_or_insert(world_bounds).encapsulate(&world_bounds);
                renderers += 1;
            }
        });

        let bounds = combined.ok_or_else(|| UnitoolzError::EmptyBounds {
            root: self.name().to_string(),
        })?;

        tracing::debug!(
            target: CORE_TARGET,
            root = self.name(),
            renderers,
            "Calculated bounds: center {:?}, size {:?}",
            bounds.center,
            bounds.size()
        );

        Ok(bounds)
    }

    /// 汇总包围盒的中心点
    ///
    /// `Space::Local` 时结果位于根对象的局部坐标系中（经根对象世界矩阵的逆变换）。
    ///
    /// # 错误
    /// - 没有渲染器时返回 `EmptyBounds`
    /// - `Space::Local` 且根对象变换不可逆（例如某个缩放分量为 0）时返回 `DegenerateTransform`
    pub fn calculate_average_bounds_center(&self, space: Space) -> Result<Vector3> {
        let center = self.calculate_bounds_recursive()?.center;

        match space {
            Space::World => Ok(center),
            Space::Local => {
                let inverse = self.world_matrix().try_inverse().ok_or_else(|| {
                    UnitoolzError::DegenerateTransform {
                        object: self.name().to_string(),
                    }
                })?;
                Ok(inverse.transform_point(&Point3::from(center)).coords)
            }
        }
    }
}
