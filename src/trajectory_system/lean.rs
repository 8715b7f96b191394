use crate::constants::LEAN_EPSILON_DEG;
use crate::control::envelope::FlightEnvelope;
use crate::control::intent::Lean;

/// Advances the lean angle by one tick: held input steps toward the limit,
/// released input decays toward zero without overshooting it.
pub fn step_angle(angle_deg: f64, lean: Lean, envelope: &FlightEnvelope) -> f64 {
    let limit = envelope.angle_limit_deg();
    match lean {
        Lean::Left => (angle_deg - envelope.angle_step_deg()).max(-limit),
        Lean::Right => (angle_deg + envelope.angle_step_deg()).min(limit),
        Lean::Neutral => decay_angle(angle_deg, envelope.angle_decay_step_deg()),
    }
}

fn decay_angle(angle_deg: f64, decay_step: f64) -> f64 {
    let decayed = if angle_deg > 0.0 {
        (angle_deg - decay_step).max(0.0)
    } else if angle_deg < 0.0 {
        (angle_deg + decay_step).min(0.0)
    } else {
        0.0
    };

    // Repeated subtraction of an inexact step leaves sub-ulp residue
    if decayed.abs() < LEAN_EPSILON_DEG {
        0.0
    } else {
        decayed
    }
}

/// Horizontal displacement for one tick. Lean is the only source of
/// horizontal motion.
pub fn lateral_displacement(angle_deg: f64, envelope: &FlightEnvelope) -> f64 {
    angle_deg / envelope.lean_to_lateral_divisor()
}
