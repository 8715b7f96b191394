use super::{envelope::FlightEnvelope, world::World};
use crate::errors::SimulationError;

/// Discrete flight mode. Only the governor moves a vehicle between phases.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum FlightPhase {
    Grounded,
    Ascending,
    CoastingUp,
    Falling,
    CoastingDown,
}

impl FlightPhase {
    /// Phases whose speed ramps and is therefore capped.
    pub fn is_ramping(self) -> bool {
        matches!(self, FlightPhase::Ascending | FlightPhase::Falling)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub lean_angle_deg: f64,
    pub phase: FlightPhase,
}

impl Vehicle {
    pub fn new(x: f64, y: f64, width: f64, height: f64, envelope: &FlightEnvelope) -> Self {
        Vehicle {
            x,
            y,
            width,
            height,
            speed: envelope.floor_speed(),
            lean_angle_deg: 0.0,
            phase: FlightPhase::Grounded,
        }
    }

    /// A vehicle resting on the floor, horizontally centered.
    pub fn on_floor(width: f64, height: f64, envelope: &FlightEnvelope, world: &World) -> Self {
        let x = (world.width - width) / 2.0;
        Self::new(x, world.floor_y(height), width, height, envelope)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Height above the floor.
    pub fn altitude(&self, world: &World) -> f64 {
        world.floor_y(self.height) - self.y
    }

    /// Checks the invariants a previous tick is supposed to have left intact.
    pub fn validate(&self, envelope: &FlightEnvelope, world: &World) -> Result<(), SimulationError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(invalid(format!(
                "speed must be finite and >= 0, got {}",
                self.speed
            )));
        }
        if self.phase.is_ramping() && self.speed > envelope.max_speed() {
            return Err(invalid(format!(
                "speed {} exceeds max speed {} while {:?}",
                self.speed,
                envelope.max_speed(),
                self.phase
            )));
        }
        if !self.lean_angle_deg.is_finite()
            || self.lean_angle_deg.abs() > envelope.angle_limit_deg()
        {
            return Err(invalid(format!(
                "lean angle {} outside +/-{}",
                self.lean_angle_deg,
                envelope.angle_limit_deg()
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0)
            || self.width > world.width
            || self.height > world.height
        {
            return Err(invalid(format!(
                "extents {}x{} do not fit world {}x{}",
                self.width, self.height, world.width, world.height
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(invalid(format!(
                "position ({}, {}) is not finite",
                self.x, self.y
            )));
        }
        if !world.contains(self.x, self.y, self.width, self.height) {
            return Err(invalid(format!(
                "position ({}, {}) outside world bounds",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SimulationError {
    SimulationError::InvalidStateError(message)
}
