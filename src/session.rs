use log::debug;

use crate::control::{
    governor::MotionGovernor,
    intent::{ControlIntent, IntentSlot},
    vehicle::Vehicle,
};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::Telemetry;

/// The tick loop's view of one flight: a governor, the vehicle it drives,
/// the slot intents arrive through and the telemetry it feeds.
///
/// A session is the single writer of its vehicle. Producers only ever touch
/// the slot, so a controller running on another thread never races a tick.
pub struct FlightSession {
    pub governor: MotionGovernor,
    pub vehicle: Vehicle,
    pub telemetry: Telemetry,
    start: Vehicle,
    slot: IntentSlot,
    episode_ticks: u64,
}

impl FlightSession {
    pub fn new(governor: MotionGovernor, vehicle: Vehicle) -> Self {
        FlightSession {
            governor,
            start: vehicle.clone(),
            vehicle,
            telemetry: Telemetry::new(),
            slot: IntentSlot::new(),
            episode_ticks: 0,
        }
    }

    /// Handle for producers; cloning it is cheap.
    pub fn intent_slot(&self) -> IntentSlot {
        self.slot.clone()
    }

    /// Reads the most recently published intent and advances one tick.
    pub fn tick(&mut self) -> Result<ControlIntent, SimulationError> {
        let intent = self.slot.latest();
        self.step(intent)?;
        Ok(intent)
    }

    /// Advances one tick with an explicit intent, bypassing the slot.
    pub fn step(&mut self, intent: ControlIntent) -> Result<(), SimulationError> {
        self.governor.advance(&mut self.vehicle, intent)?;
        self.telemetry
            .collect_data(&self.vehicle, &self.governor.world);
        self.episode_ticks += 1;
        Ok(())
    }

    /// Ticks since construction or the last reset. Telemetry keeps counting
    /// across resets.
    pub fn episode_ticks(&self) -> u64 {
        self.episode_ticks
    }

    /// Puts the vehicle back where the session started.
    pub fn reset(&mut self) {
        debug!(
            "Resetting vehicle to ({:.2}, {:.2})",
            self.start.x, self.start.y
        );
        self.vehicle = self.start.clone();
        self.episode_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{envelope::FlightEnvelope, intent::Lean, vehicle::FlightPhase, world::World};

    fn session() -> FlightSession {
        let envelope = FlightEnvelope::default();
        let world = World::default();
        let vehicle = Vehicle::on_floor(30.0, 50.0, &envelope, &world);
        FlightSession::new(MotionGovernor::new(envelope, world), vehicle)
    }

    #[test]
    fn test_tick_reads_latest_intent() {
        let mut session = session();
        let slot = session.intent_slot();

        slot.publish(ControlIntent::new(true, Lean::Left));
        slot.publish(ControlIntent::new(true, Lean::Right));
        let used = session.tick().unwrap();

        assert_eq!(used, ControlIntent::new(true, Lean::Right));
        assert_eq!(session.vehicle.phase, FlightPhase::Ascending);
        assert!(session.vehicle.lean_angle_deg > 0.0);
    }

    #[test]
    fn test_stale_intent_is_reused() {
        let mut session = session();
        session.intent_slot().publish(ControlIntent::new(true, Lean::Neutral));

        for _ in 0..10 {
            session.tick().unwrap();
        }

        assert_eq!(session.vehicle.phase, FlightPhase::Ascending);
        assert_eq!(session.telemetry.ticks(), 10);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut session = session();
        for _ in 0..30 {
            session.step(ControlIntent::new(true, Lean::Left)).unwrap();
        }
        assert_ne!(session.vehicle.y, 700.0);

        session.reset();

        assert_eq!(session.vehicle.y, 700.0);
        assert_eq!(session.vehicle.x, 485.0);
        assert_eq!(session.vehicle.phase, FlightPhase::Grounded);
        assert_eq!(session.vehicle.lean_angle_deg, 0.0);
    }

    #[test]
    fn test_reset_starts_a_new_episode() {
        let mut session = session();
        for _ in 0..12 {
            session.step(ControlIntent::new(true, Lean::Neutral)).unwrap();
        }
        assert_eq!(session.episode_ticks(), 12);

        session.reset();
        assert_eq!(session.episode_ticks(), 0);

        for _ in 0..5 {
            session.step(ControlIntent::default()).unwrap();
        }
        assert_eq!(session.episode_ticks(), 5);
        assert_eq!(session.telemetry.ticks(), 17);
    }
}
