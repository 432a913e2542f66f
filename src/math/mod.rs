//! 统一的数学库模块
//!
//! 基于 `nalgebra` 提供常用的数学类型和函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3, Matrix4, Quaternion, Point3
//! - **常量**：PI, DEG_TO_RAD 等
//! - **工具函数**：角度弧度转换, approx_eq 等
//! - **包围盒**：轴对齐包围盒 `Bounds`（见 bounds 子模块）
//! - **二维角度**：方向向量与屏幕角度互转（见 `Vector2Ext`）

pub use nalgebra::{
    Matrix4 as Mat4, Point3 as Pt3, UnitQuaternion,
    Vector2 as Vec2, Vector3 as Vec3,
};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Matrix4 = Mat4<f32>;
pub type Quaternion = UnitQuaternion<f32>;
pub type Point3 = Pt3<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 弧度转角度的系数
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// 半圆角度
    pub const HALF_CIRCLE_DEGREES: f32 = 180.0;

    /// 整圆角度
    pub const CIRCLE_DEGREES: f32 = 360.0;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 弧度转角度
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 检查两个向量是否近似相等
    pub fn approx_eq_vec3(a: &Vector3, b: &Vector3, epsilon: f32) -> bool {
        (a - b).amax() < epsilon
    }
}

// 包围盒
pub mod bounds;
pub use bounds::Bounds;

// 二维方向与角度
mod angle;
pub use angle::Vector2Ext;
