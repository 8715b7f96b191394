use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::intent::{Action, ActionDecoder, ControlIntent, IntentSlot, KeyState};
use super::vehicle::Vehicle;

/// An intent producer that sits outside the governor: keyboard replay,
/// scripted flights or an autonomous controller.
pub trait Pilot {
    fn next_intent(&mut self, vehicle: &Vehicle) -> ControlIntent;
}

/// Explores the action space uniformly at random, re-deciding every
/// `decision_interval` ticks and repeating its last action in between.
pub struct RandomPilot {
    rng: StdRng,
    decoder: ActionDecoder,
    decision_interval: u32,
    ticks_since_decision: u32,
    last_intent: ControlIntent,
}

impl RandomPilot {
    pub fn new(seed: u64, decision_interval: u32) -> Self {
        RandomPilot {
            rng: StdRng::seed_from_u64(seed),
            decoder: ActionDecoder::new(),
            decision_interval: decision_interval.max(1),
            ticks_since_decision: 0,
            last_intent: ControlIntent::default(),
        }
    }
}

impl Pilot for RandomPilot {
    fn next_intent(&mut self, _vehicle: &Vehicle) -> ControlIntent {
        if self.ticks_since_decision == 0 {
            let code = self.rng.gen_range(0..Action::COUNT);
            self.last_intent = self.decoder.decode(code);
        }
        self.ticks_since_decision = (self.ticks_since_decision + 1) % self.decision_interval;
        self.last_intent
    }
}

/// Replays `(ticks, keys)` segments in order, then holds idle input.
pub struct ScriptedPilot {
    segments: Vec<(u32, KeyState)>,
    segment: usize,
    elapsed: u32,
}

impl ScriptedPilot {
    pub fn new(segments: Vec<(u32, KeyState)>) -> Self {
        ScriptedPilot {
            segments,
            segment: 0,
            elapsed: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.segment >= self.segments.len()
    }
}

impl Pilot for ScriptedPilot {
    fn next_intent(&mut self, _vehicle: &Vehicle) -> ControlIntent {
        while let Some(&(ticks, keys)) = self.segments.get(self.segment) {
            if self.elapsed < ticks {
                self.elapsed += 1;
                return keys.into();
            }
            self.segment += 1;
            self.elapsed = 0;
        }
        ControlIntent::default()
    }
}

/// Runs `pilot` on its own thread. Every vehicle snapshot sent in is
/// answered with exactly one `next_intent` call, so interval-based pilots
/// keep counting ticks even when the worker lags behind the tick loop.
/// Dropping the sender stops the worker; joining hands the pilot back.
pub fn spawn_pilot<P>(
    mut pilot: P,
    slot: IntentSlot,
) -> (mpsc::Sender<Vehicle>, thread::JoinHandle<P>)
where
    P: Pilot + Send + 'static,
{
    let (snapshots, inbox) = mpsc::channel::<Vehicle>();
    let worker = thread::spawn(move || {
        for vehicle in inbox {
            slot.publish(pilot.next_intent(&vehicle));
        }
        pilot
    });
    (snapshots, worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::envelope::FlightEnvelope;
    use crate::control::intent::Lean;

    fn vehicle() -> Vehicle {
        Vehicle::new(10.0, 10.0, 30.0, 50.0, &FlightEnvelope::default())
    }

    #[test]
    fn test_random_pilot_is_deterministic_per_seed() {
        let vehicle = vehicle();
        let mut a = RandomPilot::new(42, 3);
        let mut b = RandomPilot::new(42, 3);

        for _ in 0..200 {
            assert_eq!(a.next_intent(&vehicle), b.next_intent(&vehicle));
        }
    }

    #[test]
    fn test_random_pilot_holds_decision_between_intervals() {
        let vehicle = vehicle();
        let mut pilot = RandomPilot::new(7, 5);

        for _ in 0..40 {
            let first = pilot.next_intent(&vehicle);
            for _ in 1..5 {
                assert_eq!(pilot.next_intent(&vehicle), first);
            }
        }
    }

    #[test]
    fn test_random_pilot_toggles_thrust() {
        let vehicle = vehicle();
        let mut pilot = RandomPilot::new(3, 1);
        let mut previous = pilot.next_intent(&vehicle);
        let mut toggles = 0;

        for _ in 0..500 {
            let intent = pilot.next_intent(&vehicle);
            if intent.thrust_held != previous.thrust_held {
                toggles += 1;
            }
            previous = intent;
        }

        assert!(toggles > 0, "a uniform pilot should toggle thrust eventually");
    }

    #[test]
    fn test_scripted_pilot_replays_segments() {
        let vehicle = vehicle();
        let climb = KeyState {
            thrust: true,
            left: false,
            right: false,
        };
        let bank = KeyState {
            thrust: false,
            left: true,
            right: false,
        };
        let mut pilot = ScriptedPilot::new(vec![(2, climb), (0, climb), (1, bank)]);

        assert_eq!(pilot.next_intent(&vehicle), ControlIntent::new(true, Lean::Neutral));
        assert_eq!(pilot.next_intent(&vehicle), ControlIntent::new(true, Lean::Neutral));
        assert_eq!(pilot.next_intent(&vehicle), ControlIntent::new(false, Lean::Left));
        assert!(!pilot.is_finished());
        assert_eq!(pilot.next_intent(&vehicle), ControlIntent::default());
        assert!(pilot.is_finished());
    }

    #[test]
    fn test_spawned_pilot_answers_every_snapshot() {
        let climb = KeyState {
            thrust: true,
            left: false,
            right: false,
        };
        let bank = KeyState {
            thrust: false,
            left: true,
            right: false,
        };
        let slot = IntentSlot::new();
        let (snapshots, worker) =
            spawn_pilot(ScriptedPilot::new(vec![(2, climb), (1, bank)]), slot.clone());

        // Queued faster than the worker drains them
        for _ in 0..3 {
            snapshots.send(vehicle()).unwrap();
        }
        drop(snapshots);
        let pilot = worker.join().unwrap();

        assert_eq!(slot.latest(), ControlIntent::new(false, Lean::Left));
        assert!(!pilot.is_finished());
    }
}
