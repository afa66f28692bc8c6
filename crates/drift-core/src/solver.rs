use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::BLEND_EPSILON;
use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::forces::flow::flow_target;
use crate::forces::pointer::{compute_repulsion, focus_scales, PointerParams};
use crate::forces::wave::{apply_wave, settle, SnapParams};
use crate::forces::MotionParams;
use crate::interaction::{FrameInput, InteractionState, WaveFront};
use crate::particle::{Lanes, ParticleSet};
use crate::sampler::sample_particles;
use crate::source::ImageData;

/// Statistics from a single simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    /// Index of the frame just simulated, starting at 1.
    pub frame: u64,
    pub particle_count: usize,
    /// Particles whose illumination is above the blend epsilon.
    pub lit_count: usize,
    pub wave_active: bool,
    pub colorized: bool,
}

/// Everything one frame's per-particle pass reads.
struct FrameContext {
    time: f32,
    damping: f32,
    baseline: MotionParams,
    snap: SnapParams,
    pointer: Option<PointerParams>,
    wave: Option<WaveFront>,
    colorized: bool,
}

/// The particle field simulation: configuration, particles, interaction
/// state and the flow clock, owned together.
pub struct Simulation {
    config: EffectConfig,
    particles: ParticleSet,
    interaction: InteractionState,
    time: f32,
    frame: u64,
}

impl Simulation {
    /// Validate `config` and build the particle field from `image`.
    pub fn new(image: &ImageData, config: EffectConfig, now_ms: f64) -> Result<Self, EffectError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = sample_particles(image, &config, &mut rng);
        if particles.is_empty() {
            log::warn!(
                "no particles survived sampling a {}x{} image; rendering empty frames",
                image.width(),
                image.height()
            );
        }
        let interaction = InteractionState::new(&config, image.size(), now_ms);

        Ok(Self {
            config,
            particles,
            interaction,
            time: 0.0,
            frame: 0,
        })
    }

    /// Step the simulation by one frame at wall-clock `now_ms`.
    pub fn step(&mut self, now_ms: f64) -> StepStats {
        let input = self.interaction.begin_frame(now_ms);
        self.time += self.config.flow_speed;
        self.frame += 1;

        let ctx = self.frame_context(&input);
        self.integrate(&ctx);
        self.interaction.finish_frame(&input);

        StepStats {
            frame: self.frame,
            particle_count: self.particles.len(),
            lit_count: self
                .particles
                .illumination()
                .iter()
                .filter(|&&l| l > BLEND_EPSILON)
                .count(),
            wave_active: self.interaction.wave().is_some(),
            colorized: self.interaction.is_colorized(),
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.interaction.pointer_moved(position);
    }

    pub fn pointer_left(&mut self) {
        self.interaction.pointer_left();
    }

    /// Manual wave trigger; see [`InteractionState::clicked`].
    pub fn clicked(&mut self, position: Vec2, now_ms: f64) -> bool {
        self.interaction.clicked(position, now_ms)
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Flow clock.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn frame_context(&self, input: &FrameInput) -> FrameContext {
        let c = &self.config;
        FrameContext {
            time: self.time,
            damping: c.damping,
            baseline: MotionParams {
                return_speed: c.return_speed,
                flow_amplitude: c.flow_amplitude,
            },
            snap: SnapParams {
                return_scale: c.snap_return_scale,
                flow_scale: c.snap_flow_scale,
            },
            pointer: input.pointer.map(|position| PointerParams {
                position,
                radius: c.mouse_radius,
                strength: c.mouse_force,
                focus_radius: c.focus_radius(),
                focus_return_scale: c.focus_return_scale,
                focus_flow_scale: c.focus_flow_scale,
            }),
            wave: input.wave,
            colorized: input.colorized,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate(&mut self, ctx: &FrameContext) {
        let Lanes {
            origin,
            phase,
            position,
            velocity,
            illumination,
        } = self.particles.lanes_mut();
        position
            .iter_mut()
            .zip(velocity.iter_mut())
            .zip(illumination.iter_mut())
            .zip(origin.iter().zip(phase.iter()))
            .for_each(|(((pos, vel), illum), (&origin, &phase))| {
                advance_particle(ctx, origin, phase, pos, vel, illum);
            });
    }

    #[cfg(feature = "parallel")]
    fn integrate(&mut self, ctx: &FrameContext) {
        let Lanes {
            origin,
            phase,
            position,
            velocity,
            illumination,
        } = self.particles.lanes_mut();
        position
            .par_iter_mut()
            .zip(velocity.par_iter_mut())
            .zip(illumination.par_iter_mut())
            .zip(origin.par_iter().zip(phase.par_iter()))
            .for_each(|(((pos, vel), illum), (&origin, &phase))| {
                advance_particle(ctx, origin, phase, pos, vel, illum);
            });
    }
}

/// One particle, one frame: repulsion, wave or settle, focus, flow target,
/// then spring integration with damping.
#[inline]
fn advance_particle(
    ctx: &FrameContext,
    origin: Vec2,
    phase: f32,
    pos: &mut Vec2,
    vel: &mut Vec2,
    illumination: &mut f32,
) {
    // ==== 1. POINTER REPULSION ====
    let mut pointer_glow = 0.0_f32;
    if let Some(pointer) = &ctx.pointer {
        if let Some(push) = compute_repulsion(*pos, phase, pointer) {
            *vel += push.vel_add;
            pointer_glow = push.force;
        }
    }

    // ==== 2/3. WAVE OR SETTLE ====
    // Decay acts on last frame's value, so this frame's pointer glow is
    // never undercut by it.
    let front_progress = ctx.wave.and_then(|w| w.progress_at(origin).map(|p| (w, p)));
    let (lit, mut motion) = match front_progress {
        Some((wave, progress)) => {
            apply_wave(*illumination, progress, wave.colorize, ctx.baseline, &ctx.snap)
        }
        None => settle(*illumination, ctx.colorized, ctx.baseline, &ctx.snap),
    };
    let illum = lit.max(pointer_glow);

    // ==== 4. POINTER FOCUS ====
    if let Some(pointer) = &ctx.pointer {
        let (return_scale, flow_scale) = focus_scales(*pos, pointer);
        motion = motion.scaled(return_scale, flow_scale);
    }

    // ==== 5. FLOW TARGET ====
    let target = flow_target(origin, phase, ctx.time, motion.flow_amplitude);

    // ==== 6. INTEGRATION ====
    *vel += (target - *pos) * motion.return_speed;
    *vel *= ctx.damping;
    *pos += *vel;
    *illumination = illum.clamp(0.0, 1.0);
}
