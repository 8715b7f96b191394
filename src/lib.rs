pub mod constants;
pub mod control;
pub mod errors;
pub mod session;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::envelope::{EnvelopeConfig, FlightEnvelope};
pub use control::governor::{advance, MotionGovernor};
pub use control::intent::{Action, ActionDecoder, ControlIntent, IntentSlot, KeyState, Lean};
pub use control::pilot::{spawn_pilot, Pilot, RandomPilot, ScriptedPilot};
pub use control::vehicle::{FlightPhase, Vehicle};
pub use control::world::World;
pub use errors::SimulationError;
pub use session::FlightSession;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;
