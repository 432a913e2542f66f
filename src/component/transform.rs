//! Transform 组件
//!
//! 管理游戏对象相对父对象的位置、旋转和缩放

use crate::math::{utils, Matrix4, Quaternion, Vector3};

/// 坐标空间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// 世界空间
    World,
    /// 对象自身的局部空间
    Local,
}

/// Transform 组件
///
/// 所有值都相对于父对象。根对象的局部变换即世界变换。
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// 局部位置
    pub position: Vector3,

    /// 局部欧拉角（度数）
    pub euler_angle: Vector3,

    /// 局部缩放
    pub scale: Vector3,
}

impl Transform {
    /// 创建单位变换
    pub fn new() -> Self {
        Self {
            position: Vector3::zeros(),
            euler_angle: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// 创建带位置的 Transform
    pub fn with_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// 设置位置（分量形式）
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    /// 设置欧拉角（分量形式，度数）
    pub fn set_euler_angle_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.euler_angle = Vector3::new(x, y, z);
    }

    /// 设置缩放（分量形式）
    pub fn set_scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
    }

    /// 局部位置归零
    pub fn reset_position(&mut self) {
        self.position = Vector3::zeros();
    }

    /// 局部旋转重置为单位旋转
    pub fn reset_rotation(&mut self) {
        self.euler_angle = Vector3::zeros();
    }

    /// 局部缩放重置为 (1, 1, 1)
    pub fn reset_scale(&mut self) {
        self.scale = Vector3::new(1.0, 1.0, 1.0);
    }

    /// 位置、旋转、缩放全部重置
    pub fn reset(&mut self) {
        self.reset_position();
        self.reset_rotation();
        self.reset_scale();
    }

    /// 局部旋转矩阵（Z * Y * X）
    fn rotation_matrix(&self) -> Matrix4 {
        let pitch = utils::deg_to_rad(self.euler_angle.x);
        let yaw = utils::deg_to_rad(self.euler_angle.y);
        let roll = utils::deg_to_rad(self.euler_angle.z);

        let rotation_x = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let rotation_y = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rotation_z = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        rotation_z * rotation_y * rotation_x
    }

    /// 局部旋转的四元数形式
    pub fn rotation(&self) -> Quaternion {
        let pitch = utils::deg_to_rad(self.euler_angle.x);
        let yaw = utils::deg_to_rad(self.euler_angle.y);
        let roll = utils::deg_to_rad(self.euler_angle.z);

        Quaternion::from_axis_angle(&Vector3::z_axis(), roll)
            * Quaternion::from_axis_angle(&Vector3::y_axis(), yaw)
            * Quaternion::from_axis_angle(&Vector3::x_axis(), pitch)
    }

    /// 局部变换矩阵
    ///
    /// 组合顺序：T * R * S
    pub fn local_matrix(&self) -> Matrix4 {
        let translation = Matrix4::new_translation(&self.position);
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * self.rotation_matrix() * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{utils::approx_eq_vec3, Point3};

    #[test]
    fn test_reset_helpers() {
        let mut transform = Transform::with_position(Vector3::new(1.0, 2.0, 3.0));
        transform.set_euler_angle_xyz(10.0, 20.0, 30.0);
        transform.set_scale_xyz(2.0, 2.0, 2.0);

        transform.reset_position();
        assert_eq!(transform.position, Vector3::zeros());
        assert_eq!(transform.euler_angle, Vector3::new(10.0, 20.0, 30.0));

        transform.reset_rotation();
        assert_eq!(transform.rotation(), Quaternion::identity());

        transform.reset_scale();
        assert_eq!(transform, Transform::default());
    }

    #[test]
    fn test_local_matrix_order() {
        let mut transform = Transform::with_position(Vector3::new(5.0, 0.0, 0.0));
        transform.set_euler_angle_xyz(0.0, 0.0, 90.0);
        transform.set_scale_xyz(2.0, 2.0, 2.0);

        // 先缩放，再绕 Z 旋转 90°，最后平移
        let point = transform.local_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(approx_eq_vec3(&point.coords, &Vector3::new(5.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let mut transform = Transform::new();
        transform.set_euler_angle_xyz(30.0, 45.0, 60.0);

        let v = Vector3::new(1.0, 2.0, 3.0);
        let by_quaternion = transform.rotation() * v;
        let by_matrix = transform.local_matrix().transform_vector(&v);
        assert!(approx_eq_vec3(&by_quaternion, &by_matrix, 1e-4));
    }
}
