use glam::Vec2;

/// Organic drift target around `origin`.
///
/// Each axis oscillates on its own frequency so particles trace slow
/// Lissajous loops; `phase` decorrelates neighbours.
///
/// # Arguments
///
/// * `origin` - Rest position of the particle.
/// * `phase` - Per-particle offset in \[0, 2pi).
/// * `time` - Flow clock, advanced by `flow_speed` each frame.
/// * `amplitude` - Loop radius in pixels for this frame.
#[inline]
pub fn flow_target(origin: Vec2, phase: f32, time: f32, amplitude: f32) -> Vec2 {
    Vec2::new(
        origin.x + (time + phase).sin() * amplitude,
        origin.y + (0.8 * time + phase).cos() * amplitude,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amplitude_is_origin() {
        let origin = Vec2::new(12.0, 7.0);
        assert_eq!(flow_target(origin, 1.3, 42.0, 0.0), origin);
    }

    #[test]
    fn test_target_stays_within_amplitude() {
        let origin = Vec2::new(50.0, 50.0);
        for step in 0..500 {
            let t = step as f32 * 0.032;
            let target = flow_target(origin, 0.7, t, 8.0);
            assert!((target.x - origin.x).abs() <= 8.0 + 1e-4);
            assert!((target.y - origin.y).abs() <= 8.0 + 1e-4);
        }
    }

    #[test]
    fn test_phase_decorrelates() {
        let origin = Vec2::ZERO;
        let a = flow_target(origin, 0.0, 1.0, 10.0);
        let b = flow_target(origin, 2.0, 1.0, 10.0);
        assert!(a.distance(b) > 1.0, "different phases should drift apart");
    }
}
