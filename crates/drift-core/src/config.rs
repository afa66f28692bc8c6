use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Every tunable of the effect. Unknown keys are rejected when parsing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Sampling stride in pixels along both axes.
    pub particle_gap: u32,
    /// Side length of the square each particle paints.
    pub particle_size: f32,
    /// Spring coefficient pulling particles toward their flow target.
    pub return_speed: f32,
    /// Velocity impulse applied by pointer repulsion at full force.
    pub mouse_force: f32,
    /// Flow clock advance per frame.
    pub flow_speed: f32,
    /// Radius of the organic drift around each origin, in pixels.
    pub flow_amplitude: f32,
    /// Velocity multiplier applied every frame, in (0, 1).
    pub damping: f32,
    /// Restrict sampling to a centered disc.
    pub circular: bool,
    /// Inset of the disc from the shorter image edge.
    pub circular_padding: f32,
    /// Pointer influence radius.
    pub mouse_radius: f32,
    /// Wave front propagation in pixels per second.
    pub wave_speed: f32,
    /// Width of the trailing band over which the wave ramps to full effect.
    pub wave_band: f32,
    /// Return speed multiplier once a colorize wave has fully passed.
    pub snap_return_scale: f32,
    /// Flow amplitude multiplier once a colorize wave has fully passed.
    pub snap_flow_scale: f32,
    /// Focus band outer radius as a multiple of `mouse_radius`.
    pub focus_radius_scale: f32,
    /// Return speed multiplier beyond the focus band.
    pub focus_return_scale: f32,
    /// Flow amplitude multiplier beyond the focus band.
    pub focus_flow_scale: f32,
    /// Idle time after construction before the automatic reveal fires.
    pub dormant_delay_ms: f64,
    /// Seed for per-particle phase offsets. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            particle_gap: 2,
            particle_size: 3.0,
            return_speed: 0.08,
            mouse_force: 0.3,
            flow_speed: 0.032,
            flow_amplitude: 10.0,
            damping: 0.38,
            circular: true,
            circular_padding: 10.0,
            mouse_radius: 90.0,
            wave_speed: 600.0,
            wave_band: 60.0,
            snap_return_scale: 2.5,
            snap_flow_scale: 0.1,
            focus_radius_scale: 2.5,
            focus_return_scale: 1.6,
            focus_flow_scale: 0.5,
            dormant_delay_ms: 3500.0,
            seed: None,
        }
    }
}

impl EffectConfig {
    /// Parse a JSON object layered over the defaults, then validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_gap == 0 {
            return Err(ConfigError::NotPositive {
                field: "particleGap",
                value: 0.0,
            });
        }

        positive("particleSize", self.particle_size)?;
        positive("mouseRadius", self.mouse_radius)?;
        positive("waveSpeed", self.wave_speed)?;
        positive("waveBand", self.wave_band)?;

        within("returnSpeed", self.return_speed, "(0, 1]", |v| v > 0.0 && v <= 1.0)?;
        within("damping", self.damping, "(0, 1)", |v| v > 0.0 && v < 1.0)?;
        within("mouseForce", self.mouse_force, "[0, inf)", |v| v >= 0.0)?;
        within("flowSpeed", self.flow_speed, "[0, inf)", |v| v >= 0.0)?;
        within("flowAmplitude", self.flow_amplitude, "[0, inf)", |v| v >= 0.0)?;
        within("circularPadding", self.circular_padding, "[0, inf)", |v| v >= 0.0)?;
        within("snapReturnScale", self.snap_return_scale, "[1, inf)", |v| v >= 1.0)?;
        within("snapFlowScale", self.snap_flow_scale, "[0, 1]", |v| (0.0..=1.0).contains(&v))?;
        within("focusRadiusScale", self.focus_radius_scale, "(1, inf)", |v| v > 1.0)?;
        within("focusReturnScale", self.focus_return_scale, "[1, inf)", |v| v >= 1.0)?;
        within("focusFlowScale", self.focus_flow_scale, "[0, 1]", |v| (0.0..=1.0).contains(&v))?;

        if !self.dormant_delay_ms.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "dormantDelayMs",
                value: self.dormant_delay_ms,
            });
        }
        if self.dormant_delay_ms < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "dormantDelayMs",
                value: self.dormant_delay_ms,
                range: "[0, inf)",
            });
        }

        let effective = self.max_return_speed();
        if effective > 1.0 {
            return Err(ConfigError::UnstableReturn {
                effective: effective as f64,
            });
        }

        Ok(())
    }

    /// Strongest spring coefficient any particle can see in one frame.
    pub fn max_return_speed(&self) -> f32 {
        self.return_speed * self.snap_return_scale * self.focus_return_scale
    }

    /// Radius beyond which pointer focus applies its full attenuation.
    pub fn focus_radius(&self) -> f32 {
        self.mouse_radius * self.focus_radius_scale
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive {
            field,
            value: value as f64,
        });
    }
    Ok(())
}

fn within(
    field: &'static str,
    value: f32,
    range: &'static str,
    accept: impl Fn(f32) -> bool,
) -> Result<(), ConfigError> {
    finite(field, value)?;
    if !accept(value) {
        return Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            range,
        });
    }
    Ok(())
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite {
            field,
            value: value as f64,
        });
    }
    Ok(())
}
