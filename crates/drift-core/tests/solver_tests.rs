use drift_core::{EffectConfig, EffectError, ImageData, Rgba, Simulation};
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn make_image() -> ImageData {
    ImageData::solid(48, 48, Rgba::new(220, 80, 40, 255)).unwrap()
}

fn make_config() -> EffectConfig {
    EffectConfig {
        particle_gap: 3,
        dormant_delay_ms: 1.0e9,
        seed: Some(42),
        ..EffectConfig::default()
    }
}

/// Step `frames` frames starting after `start_frame`, returning the last frame index.
fn run(sim: &mut Simulation, start_frame: u64, frames: u64) -> u64 {
    for f in start_frame + 1..=start_frame + frames {
        sim.step(f as f64 * FRAME_MS);
    }
    start_frame + frames
}

fn assert_finite(sim: &Simulation) {
    for (i, p) in sim.particles().iter().enumerate() {
        assert!(p.position.is_finite(), "particle {i} position {:?}", p.position);
        assert!(p.velocity.is_finite(), "particle {i} velocity {:?}", p.velocity);
    }
}

#[test]
fn test_origins_never_move() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    let before = sim.particles().origins().to_vec();

    sim.pointer_moved(Vec2::new(24.0, 24.0));
    let mut f = run(&mut sim, 0, 60);
    sim.clicked(Vec2::new(0.0, 0.0), f as f64 * FRAME_MS);
    f = run(&mut sim, f, 200);
    sim.pointer_left();
    run(&mut sim, f, 60);

    assert_eq!(sim.particles().origins(), before.as_slice());
    assert_finite(&sim);
}

#[test]
fn test_particle_count_is_fixed() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    let count = sim.particles().len();
    assert!(count > 0);
    for f in 1..=50 {
        let stats = sim.step(f as f64 * FRAME_MS);
        assert_eq!(stats.particle_count, count);
        assert_eq!(stats.frame, f);
    }
}

#[test]
fn test_idle_particles_converge_to_origin_without_flow() {
    let config = EffectConfig {
        flow_amplitude: 0.0,
        ..make_config()
    };
    let mut sim = Simulation::new(&make_image(), config, 0.0).unwrap();

    // Scatter with the pointer, then let go
    sim.pointer_moved(Vec2::new(24.0, 24.0));
    let f = run(&mut sim, 0, 20);
    sim.pointer_left();

    let max_offset = |sim: &Simulation| {
        sim.particles()
            .iter()
            .map(|p| p.position.distance(p.origin))
            .fold(0.0_f32, f32::max)
    };
    let start = max_offset(&sim);
    assert!(start > 0.1, "pointer should have displaced something");

    let f = run(&mut sim, f, 50);
    let at_50 = max_offset(&sim);
    let f = run(&mut sim, f, 50);
    let at_100 = max_offset(&sim);
    run(&mut sim, f, 200);
    let at_300 = max_offset(&sim);

    assert!(at_50 < start);
    assert!(at_100 < at_50);
    assert!(at_300 < at_100);
    assert!(at_300 < 1e-3, "still {} px away after 300 frames", at_300);
}

#[test]
fn test_idle_particles_follow_flow_loop() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    run(&mut sim, 0, 600);

    let amplitude = sim.config().flow_amplitude;
    for p in sim.particles().iter() {
        let offset = p.position - p.origin;
        assert!(
            offset.x.abs() <= amplitude + 1.0 && offset.y.abs() <= amplitude + 1.0,
            "drifted {:?} past the flow loop",
            offset
        );
    }
    assert_finite(&sim);
}

#[test]
fn test_colorize_wave_lights_every_particle() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    assert!(sim.clicked(Vec2::new(3.0, 5.0), 0.0));

    let mut frame = 0;
    while sim.interaction().wave().is_some() {
        frame += 1;
        assert!(frame < 10_000, "wave never completed");
        sim.step(frame as f64 * FRAME_MS);
    }

    assert!(sim.interaction().is_colorized());
    for (i, &l) in sim.particles().illumination().iter().enumerate() {
        assert!(l >= 1.0 - 1e-6, "particle {i} illumination {l}");
    }
    let p = sim.particles().get(0).unwrap();
    assert_eq!(p.color(), p.base_color);
}

#[test]
fn test_colorized_field_holds_tighter_formation() {
    let loose = {
        let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
        run(&mut sim, 0, 400);
        mean_offset(&sim)
    };

    let tight = {
        let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
        sim.clicked(Vec2::ZERO, 0.0);
        run(&mut sim, 0, 400);
        assert!(sim.interaction().is_colorized());
        mean_offset(&sim)
    };

    assert!(tight < loose * 0.5, "tight {} vs loose {}", tight, loose);
}

fn mean_offset(sim: &Simulation) -> f32 {
    let particles = sim.particles();
    particles
        .iter()
        .map(|p| p.position.distance(p.origin))
        .sum::<f32>()
        / particles.len() as f32
}

#[test]
fn test_second_click_returns_field_to_grayscale() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    sim.clicked(Vec2::new(24.0, 24.0), 0.0);
    let f = run(&mut sim, 0, 200);
    assert!(sim.interaction().is_colorized());

    assert!(sim.clicked(Vec2::new(24.0, 24.0), f as f64 * FRAME_MS));
    let f = run(&mut sim, f, 200);
    assert!(!sim.interaction().is_colorized());
    assert!(sim.interaction().wave().is_none());
    run(&mut sim, f, 200);

    for (i, &l) in sim.particles().illumination().iter().enumerate() {
        assert_eq!(l, 0.0, "particle {i} still lit");
    }
    let p = sim.particles().get(0).unwrap();
    assert_eq!(p.color(), p.gray_color);
}

#[test]
fn test_dormant_reveal_colorizes_untouched_field() {
    let config = EffectConfig {
        dormant_delay_ms: 500.0,
        ..make_config()
    };
    let mut sim = Simulation::new(&make_image(), config, 0.0).unwrap();
    let stats = sim.step(100.0);
    assert!(!stats.wave_active);

    run(&mut sim, 30, 200);
    assert!(sim.interaction().is_colorized());
    assert!(sim.particles().illumination().iter().all(|&l| l >= 1.0 - 1e-6));
}

#[test]
fn test_stats_report_lit_particles() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    let stats = sim.step(FRAME_MS);
    assert_eq!(stats.lit_count, 0);
    assert!(!stats.colorized);

    sim.pointer_moved(Vec2::new(24.0, 24.0));
    let stats = sim.step(2.0 * FRAME_MS);
    assert!(stats.lit_count > 0);
    assert!(stats.lit_count <= stats.particle_count);
}

#[test]
fn test_empty_field_runs_harmlessly() {
    let image = ImageData::solid(16, 16, Rgba::new(0, 0, 0, 0)).unwrap();
    let mut sim = Simulation::new(&image, make_config(), 0.0).unwrap();
    assert!(sim.particles().is_empty());

    sim.pointer_moved(Vec2::new(8.0, 8.0));
    sim.clicked(Vec2::new(8.0, 8.0), 0.0);
    for f in 1..=100 {
        let stats = sim.step(f as f64 * FRAME_MS);
        assert_eq!(stats.particle_count, 0);
    }
    assert!(sim.interaction().is_colorized());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EffectConfig {
        damping: 1.5,
        ..make_config()
    };
    let err = Simulation::new(&make_image(), config, 0.0).err().unwrap();
    assert!(matches!(err, EffectError::Config(_)), "got {err:?}");
}

#[test]
fn test_flow_clock_advances_by_flow_speed() {
    let mut sim = Simulation::new(&make_image(), make_config(), 0.0).unwrap();
    run(&mut sim, 0, 10);
    assert!((sim.time() - 10.0 * 0.032).abs() < 1e-5);
}
