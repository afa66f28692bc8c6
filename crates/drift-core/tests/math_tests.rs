use drift_core::math::*;

#[test]
fn test_mix_endpoints() {
    assert_eq!(mix(2.0, 6.0, 0.0), 2.0);
    assert_eq!(mix(2.0, 6.0, 1.0), 6.0);
    assert_eq!(mix(2.0, 6.0, 0.5), 4.0);
}

#[test]
fn test_linear_step_clamps() {
    assert_eq!(linear_step(10.0, 20.0, 5.0), 0.0);
    assert_eq!(linear_step(10.0, 20.0, 25.0), 1.0);
    assert!((linear_step(10.0, 20.0, 12.5) - 0.25).abs() < 1e-6);
}

#[test]
fn test_linear_step_degenerate_range() {
    assert_eq!(linear_step(5.0, 5.0, 4.9), 0.0);
    assert_eq!(linear_step(5.0, 5.0, 5.0), 1.0);
}

#[test]
fn test_luminance_weights() {
    assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
    assert_eq!(luminance(0, 0, 0), 0.0);
    let y = luminance(200, 100, 50);
    assert!((y - 124.2).abs() < 1e-3, "luma of (200,100,50) = {}", y);
}

#[test]
fn test_to_channel_rounds_and_clamps() {
    assert_eq!(to_channel(124.2), 124);
    assert_eq!(to_channel(124.5), 125);
    assert_eq!(to_channel(-3.0), 0);
    assert_eq!(to_channel(300.0), 255);
}
