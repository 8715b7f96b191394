use log::info;

use crate::control::vehicle::{FlightPhase, Vehicle};
use crate::control::world::World;

pub struct Telemetry {
    pub log: Vec<String>,
    ticks: u64,
    max_speed: f64,
    max_altitude: f64,
    max_lean: f64,
    phase_changes: Vec<(FlightPhase, u64)>,
    keep_log: bool,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            ticks: 0,
            max_speed: 0.0,
            max_altitude: 0.0,
            max_lean: 0.0,
            phase_changes: Vec::new(),
            keep_log: false,
        }
    }

    /// Also keeps a formatted line per tick in `log`.
    pub fn verbose() -> Self {
        Telemetry {
            keep_log: true,
            ..Self::new()
        }
    }

    fn format_ticks(ticks: u64, ticks_per_second: u32) -> String {
        let seconds = ticks as f64 / f64::from(ticks_per_second.max(1));
        if seconds >= 60.0 {
            let minutes = (seconds / 60.0).floor();
            format!("{:.0}m {:.2}s", minutes, seconds % 60.0)
        } else {
            format!("{:.2}s", seconds)
        }
    }

    pub fn collect_data(&mut self, vehicle: &Vehicle, world: &World) {
        self.ticks += 1;
        let altitude = vehicle.altitude(world);

        if vehicle.speed > self.max_speed {
            self.max_speed = vehicle.speed;
        }
        if altitude > self.max_altitude {
            self.max_altitude = altitude;
        }
        if vehicle.lean_angle_deg.abs() > self.max_lean {
            self.max_lean = vehicle.lean_angle_deg.abs();
        }

        if self.keep_log {
            self.log.push(format!(
                "Tick {}: {:?} | x = {:.2}, y = {:.2} | Speed: {:.3} | Lean: {:.1}°",
                self.ticks, vehicle.phase, vehicle.x, vehicle.y, vehicle.speed, vehicle.lean_angle_deg
            ));
        }

        match self.phase_changes.last() {
            Some((last_phase, _)) if *last_phase == vehicle.phase => {}
            _ => self.phase_changes.push((vehicle.phase, self.ticks)),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_lean(&self) -> f64 {
        self.max_lean
    }

    /// Each phase the vehicle entered, with the tick it was first seen on.
    pub fn phase_changes(&self) -> &[(FlightPhase, u64)] {
        &self.phase_changes
    }

    pub fn display_data(&self, ticks_per_second: u32) {
        for entry in &self.log {
            info!("{}", entry);
        }

        info!("--- Flight Summary ---");
        info!(
            "Duration: {} ({} ticks)",
            Self::format_ticks(self.ticks, ticks_per_second),
            self.ticks
        );
        info!("Max Speed: {:.3}", self.max_speed);
        info!("Max Altitude: {:.2}", self.max_altitude);
        info!("Max Lean: {:.1}°", self.max_lean);

        info!("--- Phase Changes ---");
        for (phase, tick) in &self.phase_changes {
            info!(
                "{:?} entered at {}",
                phase,
                Self::format_ticks(*tick, ticks_per_second)
            );
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::envelope::FlightEnvelope;

    fn vehicle_at(y: f64, speed: f64, phase: FlightPhase) -> Vehicle {
        let mut vehicle = Vehicle::new(100.0, y, 30.0, 50.0, &FlightEnvelope::default());
        vehicle.speed = speed;
        vehicle.phase = phase;
        vehicle
    }

    #[test]
    fn test_tracks_extremes() {
        let world = World::default();
        let mut telemetry = Telemetry::new();

        telemetry.collect_data(&vehicle_at(650.0, 1.5, FlightPhase::Ascending), &world);
        telemetry.collect_data(&vehicle_at(600.0, 3.0, FlightPhase::Ascending), &world);
        telemetry.collect_data(&vehicle_at(640.0, 2.0, FlightPhase::Falling), &world);

        assert_eq!(telemetry.ticks(), 3);
        assert_eq!(telemetry.max_speed(), 3.0);
        assert_eq!(telemetry.max_altitude(), 100.0);
        assert!(telemetry.log.is_empty());
    }

    #[test]
    fn test_records_phase_changes_once() {
        let world = World::default();
        let mut telemetry = Telemetry::new();

        for phase in [
            FlightPhase::Grounded,
            FlightPhase::Ascending,
            FlightPhase::Ascending,
            FlightPhase::CoastingUp,
            FlightPhase::CoastingUp,
            FlightPhase::Falling,
        ] {
            telemetry.collect_data(&vehicle_at(500.0, 1.0, phase), &world);
        }

        assert_eq!(
            telemetry.phase_changes(),
            &[
                (FlightPhase::Grounded, 1),
                (FlightPhase::Ascending, 2),
                (FlightPhase::CoastingUp, 4),
                (FlightPhase::Falling, 6),
            ]
        );
    }

    #[test]
    fn test_verbose_keeps_log_lines() {
        let world = World::default();
        let mut telemetry = Telemetry::verbose();
        let mut vehicle = vehicle_at(500.0, 1.0, FlightPhase::Falling);
        vehicle.lean_angle_deg = -12.0;

        telemetry.collect_data(&vehicle, &world);

        assert_eq!(telemetry.log.len(), 1);
        assert!(telemetry.log[0].starts_with("Tick 1: Falling"));
        assert_eq!(telemetry.max_lean(), 12.0);
    }

    #[test]
    fn test_format_ticks() {
        assert_eq!(Telemetry::format_ticks(30, 60), "0.50s");
        assert_eq!(Telemetry::format_ticks(4500, 60), "1m 15.00s");
    }
}
