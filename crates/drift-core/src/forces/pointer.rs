use glam::Vec2;

use crate::math::{linear_step, mix};

/// Parameters describing the pointer interaction for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerParams {
    pub position: Vec2,
    /// Repulsion radius.
    pub radius: f32,
    /// Impulse at full repulsion force.
    pub strength: f32,
    /// Outer edge of the focus band.
    pub focus_radius: f32,
    /// Return speed multiplier at and beyond the focus band edge.
    pub focus_return_scale: f32,
    /// Flow amplitude multiplier at and beyond the focus band edge.
    pub focus_flow_scale: f32,
}

/// Result of pointer repulsion on one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repulsion {
    /// Velocity to add.
    pub vel_add: Vec2,
    /// Squared falloff in [0,1]; 1 at the pointer, 0 at the radius.
    pub force: f32,
}

/// Push a particle at `pos` away from the pointer.
///
/// Returns `None` outside the repulsion radius. A particle sitting exactly on
/// the pointer is pushed along its phase angle.
pub fn compute_repulsion(pos: Vec2, phase: f32, params: &PointerParams) -> Option<Repulsion> {
    let offset = pos - params.position;
    let d2 = offset.length_squared();
    if d2 >= params.radius * params.radius {
        return None;
    }

    let dist = d2.sqrt();
    let falloff = (params.radius - dist) / params.radius;
    let force = falloff * falloff;
    let dir = if dist > 1e-4 {
        offset / dist
    } else {
        Vec2::from_angle(phase)
    };

    Some(Repulsion {
        vel_add: dir * force * params.strength,
        force,
    })
}

/// Return-speed and flow multipliers from pointer proximity.
///
/// Inside the repulsion radius nothing changes. Across the focus band the
/// multipliers ramp linearly to their configured values, which hold for
/// every particle farther out.
pub fn focus_scales(pos: Vec2, params: &PointerParams) -> (f32, f32) {
    let d2 = pos.distance_squared(params.position);
    if d2 < params.radius * params.radius {
        return (1.0, 1.0);
    }
    if d2 >= params.focus_radius * params.focus_radius {
        return (params.focus_return_scale, params.focus_flow_scale);
    }

    let t = linear_step(params.radius, params.focus_radius, d2.sqrt());
    (
        mix(1.0, params.focus_return_scale, t),
        mix(1.0, params.focus_flow_scale, t),
    )
}
