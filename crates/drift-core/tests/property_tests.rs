use drift_core::render::render;
use drift_core::{EffectConfig, FrameBuffer, ImageData, Rgba, Simulation};
use glam::Vec2;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Event {
    Move(f32, f32),
    Leave,
    Click(f32, f32),
    Idle(u8),
}

fn any_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => (-50.0_f32..100.0, -50.0_f32..100.0).prop_map(|(x, y)| Event::Move(x, y)),
        1 => Just(Event::Leave),
        1 => (-50.0_f32..100.0, -50.0_f32..100.0).prop_map(|(x, y)| Event::Click(x, y)),
        2 => (1_u8..40).prop_map(Event::Idle),
    ]
}

fn make_sim(seed: u64, gap: u32) -> Simulation {
    let image = ImageData::solid(40, 30, Rgba::new(180, 60, 200, 255)).unwrap();
    let config = EffectConfig {
        particle_gap: gap,
        circular: false,
        dormant_delay_ms: 400.0,
        seed: Some(seed),
        ..EffectConfig::default()
    };
    Simulation::new(&image, config, 0.0).unwrap()
}

proptest! {
    #[test]
    fn state_stays_bounded_under_any_input(
        seed in any::<u64>(),
        gap in 1_u32..6,
        events in prop::collection::vec(any_event(), 1..40),
    ) {
        let mut sim = make_sim(seed, gap);
        let origins = sim.particles().origins().to_vec();
        let mut frame = FrameBuffer::new(40, 30);
        let mut now = 0.0_f64;

        for event in events {
            let steps = match event {
                Event::Move(x, y) => { sim.pointer_moved(Vec2::new(x, y)); 1 }
                Event::Leave => { sim.pointer_left(); 1 }
                Event::Click(x, y) => { sim.clicked(Vec2::new(x, y), now); 1 }
                Event::Idle(n) => n as u32,
            };
            for _ in 0..steps {
                now += 16.0;
                sim.step(now);
            }

            for (i, p) in sim.particles().iter().enumerate() {
                prop_assert!(p.position.is_finite(), "particle {i} at {:?}", p.position);
                prop_assert!(p.velocity.is_finite(), "particle {i} moving {:?}", p.velocity);
                prop_assert!(
                    (0.0..=1.0).contains(&p.illumination),
                    "particle {i} illumination {}", p.illumination
                );
            }
            render(sim.particles(), &mut frame);
        }

        prop_assert_eq!(sim.particles().origins(), origins.as_slice());
    }

    #[test]
    fn drawn_colors_stay_between_gray_and_base(
        seed in any::<u64>(),
        click_x in 0.0_f32..40.0,
        frames in 1_u32..60,
    ) {
        let mut sim = make_sim(seed, 3);
        sim.clicked(Vec2::new(click_x, 15.0), 0.0);
        for f in 1..=frames {
            sim.step(f as f64 * 16.0);
        }

        for p in sim.particles().iter() {
            let c = p.color();
            let (lo, hi) = (p.gray_color.r.min(p.base_color.r), p.gray_color.r.max(p.base_color.r));
            prop_assert!(c.r >= lo && c.r <= hi);
            let (lo, hi) = (p.gray_color.g.min(p.base_color.g), p.gray_color.g.max(p.base_color.g));
            prop_assert!(c.g >= lo && c.g <= hi);
            prop_assert_eq!(c.a, 255);
        }
    }
}
