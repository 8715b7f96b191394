//! Per-tick flight dynamics.
//!
//! One call to [`advance`] moves a vehicle by exactly one tick. The handlers
//! run in a fixed order and later handlers read the phase and speed that
//! earlier ones left behind, so a coast that ends mid-tick hands over to the
//! next phase within the same tick.

use log::{trace, warn};

use super::{
    envelope::FlightEnvelope,
    intent::ControlIntent,
    vehicle::{FlightPhase, Vehicle},
    world::World,
};
use crate::errors::SimulationError;
use crate::trajectory_system::{boundary, lean};

/// A governor bound to one envelope and one world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionGovernor {
    pub envelope: FlightEnvelope,
    pub world: World,
}

impl MotionGovernor {
    pub fn new(envelope: FlightEnvelope, world: World) -> Self {
        MotionGovernor { envelope, world }
    }

    pub fn advance(&self, vehicle: &mut Vehicle, intent: ControlIntent) -> Result<(), SimulationError> {
        advance(vehicle, &self.envelope, &self.world, intent)
    }
}

/// Advances `vehicle` by one tick.
///
/// Fails with `InvalidStateError` without touching the vehicle if it enters
/// the tick already violating its invariants.
pub fn advance(
    vehicle: &mut Vehicle,
    envelope: &FlightEnvelope,
    world: &World,
    intent: ControlIntent,
) -> Result<(), SimulationError> {
    if let Err(e) = vehicle.validate(envelope, world) {
        warn!("Rejected tick: {}", e);
        return Err(e);
    }

    let floor_y = world.floor_y(vehicle.height);

    snap_to_ground(vehicle, envelope, floor_y);
    handle_coasting_up(vehicle, envelope);
    handle_falling(vehicle, envelope);
    handle_coasting_down(vehicle, envelope);
    handle_thrust(vehicle, envelope, intent, floor_y);
    handle_lean(vehicle, envelope, intent);
    handle_boundary_conditions(vehicle, world);

    Ok(())
}

fn is_on_floor(vehicle: &Vehicle, floor_y: f64, tolerance: f64) -> bool {
    if vehicle.y == floor_y {
        return true;
    }
    // Tolerant contact only applies on the way down
    tolerance > 0.0
        && matches!(
            vehicle.phase,
            FlightPhase::Grounded | FlightPhase::Falling | FlightPhase::CoastingDown
        )
        && (vehicle.y - floor_y).abs() <= tolerance
}

fn snap_to_ground(vehicle: &mut Vehicle, envelope: &FlightEnvelope, floor_y: f64) {
    if is_on_floor(vehicle, floor_y, envelope.ground_tolerance()) {
        vehicle.y = floor_y;
        vehicle.speed = envelope.floor_speed();
        enter(vehicle, FlightPhase::Grounded);
    }
}

fn handle_coasting_up(vehicle: &mut Vehicle, envelope: &FlightEnvelope) {
    if vehicle.phase != FlightPhase::CoastingUp {
        return;
    }
    vehicle.speed *= envelope.decel_factor();
    vehicle.y -= vehicle.speed;
    if vehicle.speed <= envelope.floor_speed() {
        enter(vehicle, FlightPhase::Falling);
    }
}

fn handle_falling(vehicle: &mut Vehicle, envelope: &FlightEnvelope) {
    if vehicle.phase != FlightPhase::Falling {
        return;
    }
    vehicle.y += vehicle.speed;
    vehicle.speed = ramp(vehicle.speed, envelope.fall_accel_factor(), envelope.max_speed());
}

fn handle_coasting_down(vehicle: &mut Vehicle, envelope: &FlightEnvelope) {
    if vehicle.phase != FlightPhase::CoastingDown {
        return;
    }
    vehicle.speed *= envelope.decel_factor();
    vehicle.y += vehicle.speed;
    if vehicle.speed <= envelope.floor_speed() {
        vehicle.speed = envelope.floor_speed();
        enter(vehicle, FlightPhase::Ascending);
    }
}

fn handle_thrust(
    vehicle: &mut Vehicle,
    envelope: &FlightEnvelope,
    intent: ControlIntent,
    floor_y: f64,
) {
    match (intent.thrust_held, vehicle.phase) {
        (true, FlightPhase::Grounded | FlightPhase::Ascending) => {
            enter(vehicle, FlightPhase::Ascending);
            vehicle.y -= vehicle.speed;
            vehicle.speed = ramp(vehicle.speed, envelope.speed_up_factor(), envelope.max_speed());
        }
        // Re-thrust mid-fall brakes first; the climb starts once the coast ends
        (true, FlightPhase::Falling) => enter(vehicle, FlightPhase::CoastingDown),
        (false, FlightPhase::Ascending) => enter(vehicle, FlightPhase::CoastingUp),
        (false, FlightPhase::Grounded) if vehicle.y < floor_y => {
            enter(vehicle, FlightPhase::Falling)
        }
        _ => {}
    }
}

fn handle_lean(vehicle: &mut Vehicle, envelope: &FlightEnvelope, intent: ControlIntent) {
    vehicle.lean_angle_deg = lean::step_angle(vehicle.lean_angle_deg, intent.lean, envelope);
    vehicle.x += lean::lateral_displacement(vehicle.lean_angle_deg, envelope);
}

fn handle_boundary_conditions(vehicle: &mut Vehicle, world: &World) {
    vehicle.x = boundary::clamp(vehicle.x, vehicle.width, world.width);
    vehicle.y = boundary::clamp(vehicle.y, vehicle.height, world.height);
}

fn ramp(speed: f64, factor: f64, max_speed: f64) -> f64 {
    if speed < max_speed {
        (speed * factor).min(max_speed)
    } else {
        speed
    }
}

fn enter(vehicle: &mut Vehicle, phase: FlightPhase) {
    if vehicle.phase != phase {
        trace!(
            "Phase {:?} -> {:?} (speed {:.3}, y {:.3})",
            vehicle.phase,
            phase,
            vehicle.speed,
            vehicle.y
        );
        vehicle.phase = phase;
    }
}
