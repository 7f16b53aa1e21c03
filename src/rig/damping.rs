//! Frame-rate independent exponential damping

use macroquad::math::Vec3;

/// Fraction of the remaining distance covered after `dt` seconds
pub fn damp_factor(smooth_time: f32, dt: f32) -> f32 {
    if smooth_time <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt.max(0.0) / smooth_time).exp()
}

pub fn damp3(current: Vec3, target: Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    current + (target - current) * damp_factor(smooth_time, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dt_holds() {
        let v = damp3(Vec3::ONE, Vec3::splat(5.0), 0.25, 0.0);
        assert!((v - Vec3::ONE).length() < 0.0001);
    }

    #[test]
    fn test_never_overshoots() {
        let mut value = Vec3::ZERO;
        for _ in 0..600 {
            value = damp3(value, Vec3::X, 0.25, 1.0 / 60.0);
            assert!(value.x <= 1.0);
        }
        assert!((value - Vec3::X).length() < 0.001);
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut fast = Vec3::ZERO;
        for _ in 0..4 {
            fast = damp3(fast, Vec3::Y, 0.25, 0.025);
        }
        let slow = damp3(Vec3::ZERO, Vec3::Y, 0.25, 0.1);
        assert!((fast - slow).length() < 0.0001);
    }

    #[test]
    fn test_non_positive_smooth_time_snaps() {
        let v = damp3(Vec3::ZERO, Vec3::ONE, 0.0, 0.016);
        assert!((v - Vec3::ONE).length() < 0.0001);
    }
}
