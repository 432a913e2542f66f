//! 二维方向与屏幕角度
//!
//! 角度以度为单位，0° 指向 +Y，逆时针增加，与场景中绕 Z 轴的旋转角一致。

use super::constants::{CIRCLE_DEGREES, HALF_CIRCLE_DEGREES};
use super::{utils, Vector2};

/// 数学角度（0° 指向 +X）与场景旋转角（0° 指向 +Y）之间的偏移
const ROTATION_ANGLE_OFFSET: f32 = 90.0;

/// 二维向量扩展 trait
pub trait Vector2Ext {
    /// 向量方向对应的角度，范围 `[0, 360)`
    ///
    /// 零向量返回 270（`atan2(0, 0)` 为 0）。
    fn to_angle(&self) -> f32;

    /// 返回指向 `angle` 方向、长度与 `self` 相同的向量
    fn from_angle(&self, angle: f32) -> Vector2;

    /// 从 `target` 方向到 `self` 方向的有符号最小角度差
    ///
    /// 结果满足 `|delta| <= 180`，且 `a.smallest_delta_angle(b) == -b.smallest_delta_angle(a)`。
    fn smallest_delta_angle(&self, target: &Vector2) -> f32;
}

impl Vector2Ext for Vector2 {
    fn to_angle(&self) -> f32 {
        (CIRCLE_DEGREES - ROTATION_ANGLE_OFFSET + utils::rad_to_deg(self.y.atan2(self.x)))
            .rem_euclid(CIRCLE_DEGREES)
    }

    fn from_angle(&self, angle: f32) -> Vector2 {
        let radians = utils::deg_to_rad(angle + ROTATION_ANGLE_OFFSET);
        Vector2::new(radians.cos(), radians.sin()) * self.norm()
    }

    fn smallest_delta_angle(&self, target: &Vector2) -> f32 {
        let delta = self.to_angle() - target.to_angle();
        if delta.abs() > HALF_CIRCLE_DEGREES {
            delta.signum() * (delta.abs() - CIRCLE_DEGREES)
        } else {
            delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::approx_eq;

    const TOLERANCE: f32 = 1e-3;

    #[test]
    fn test_cardinal_directions() {
        assert!(approx_eq(Vector2::new(0.0, 1.0).to_angle(), 0.0, TOLERANCE));
        assert!(approx_eq(Vector2::new(-1.0, 0.0).to_angle(), 90.0, TOLERANCE));
        assert!(approx_eq(Vector2::new(0.0, -1.0).to_angle(), 180.0, TOLERANCE));
        assert!(approx_eq(Vector2::new(1.0, 0.0).to_angle(), 270.0, TOLERANCE));
    }

    #[test]
    fn test_angle_range() {
        for i in 0..72 {
            let radians = utils::deg_to_rad(i as f32 * 5.0);
            let angle = Vector2::new(radians.cos(), radians.sin()).to_angle();
            assert!((0.0..360.0).contains(&angle), "angle out of range: {}", angle);
        }
    }

    #[test]
    fn test_from_angle_keeps_magnitude() {
        let v = Vector2::new(3.0, 4.0).from_angle(90.0);
        assert!(approx_eq(v.x, -5.0, TOLERANCE));
        assert!(approx_eq(v.y, 0.0, TOLERANCE));
    }

    #[test]
    fn test_angle_round_trip() {
        let samples = [
            Vector2::new(1.0, 0.0),
            Vector2::new(0.3, -2.0),
            Vector2::new(-7.5, 1.25),
            Vector2::new(-0.01, -0.02),
        ];

        for v in samples {
            let rebuilt = v.from_angle(v.to_angle());
            assert!((rebuilt - v).norm() < TOLERANCE * v.norm().max(1.0), "{:?} -> {:?}", v, rebuilt);
            assert!(approx_eq(rebuilt.to_angle(), v.to_angle(), TOLERANCE));
        }
    }

    #[test]
    fn test_smallest_delta_wraps_around() {
        // 10° 与 350°
        let a = Vector2::new(0.0, 1.0).from_angle(10.0);
        let b = Vector2::new(0.0, 1.0).from_angle(350.0);

        assert!(approx_eq(a.smallest_delta_angle(&b), 20.0, TOLERANCE));
        assert!(approx_eq(b.smallest_delta_angle(&a), -20.0, TOLERANCE));
    }

    #[test]
    fn test_smallest_delta_is_antisymmetric_and_bounded() {
        let unit = Vector2::new(0.0, 1.0);
        for i in 0..36 {
            for j in 0..36 {
                let a = unit.from_angle(i as f32 * 10.0 + 3.0);
                let b = unit.from_angle(j as f32 * 10.0);
                let ab = a.smallest_delta_angle(&b);
                let ba = b.smallest_delta_angle(&a);

                assert!(approx_eq(ab, -ba, TOLERANCE), "{} vs {}", ab, ba);
                assert!(ab.abs() <= HALF_CIRCLE_DEGREES + TOLERANCE);
            }
        }
    }

    #[test]
    fn test_zero_vector() {
        let zero = Vector2::zeros();
        assert!(approx_eq(zero.to_angle(), 270.0, TOLERANCE));
        assert_eq!(zero.from_angle(45.0), Vector2::zeros());
    }
}
