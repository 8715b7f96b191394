//! Control intent and the adapters that produce it.
//!
//! Two input shapes reach the governor: a per-tick key snapshot and a
//! discrete action code from an autonomous controller. Both collapse into a
//! `ControlIntent` here; the governor never sees anything else.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Requested lean direction for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lean {
    /// No lean input; the angle decays toward zero.
    #[default]
    Neutral,
    Left,
    Right,
}

/// Normalized per-tick input consumed by the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlIntent {
    pub thrust_held: bool,
    pub lean: Lean,
}

impl ControlIntent {
    pub fn new(thrust_held: bool, lean: Lean) -> Self {
        ControlIntent { thrust_held, lean }
    }

    fn pack(self) -> u8 {
        let lean_bits = match self.lean {
            Lean::Neutral => 0,
            Lean::Left => 1,
            Lean::Right => 2,
        };
        (self.thrust_held as u8) | (lean_bits << 1)
    }

    fn unpack(bits: u8) -> Self {
        let lean = match (bits >> 1) & 0x03 {
            1 => Lean::Left,
            2 => Lean::Right,
            _ => Lean::Neutral,
        };
        ControlIntent {
            thrust_held: bits & 0x01 != 0,
            lean,
        }
    }
}

/// Keyboard or device snapshot sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub thrust: bool,
    pub left: bool,
    pub right: bool,
}

impl From<KeyState> for ControlIntent {
    fn from(keys: KeyState) -> Self {
        let lean = match (keys.left, keys.right) {
            (true, false) => Lean::Left,
            (false, true) => Lean::Right,
            _ => Lean::Neutral,
        };
        ControlIntent {
            thrust_held: keys.thrust,
            lean,
        }
    }
}

/// Discrete actions an autonomous controller can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    ToggleThrust = 0,
    LeanLeft = 1,
    LeanRight = 2,
}

impl Action {
    pub const COUNT: u8 = 3;

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Action::ToggleThrust),
            1 => Some(Action::LeanLeft),
            2 => Some(Action::LeanRight),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Turns action codes into intents. Thrust is a latched toggle, so the
/// decoder carries it from one code to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionDecoder {
    thrust_held: bool,
}

impl ActionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thrust_held(&self) -> bool {
        self.thrust_held
    }

    /// Codes outside the action set leave thrust untouched and clear lean.
    pub fn decode(&mut self, code: u8) -> ControlIntent {
        match Action::from_code(code) {
            Some(action) => self.apply(action),
            None => ControlIntent::new(self.thrust_held, Lean::Neutral),
        }
    }

    pub fn apply(&mut self, action: Action) -> ControlIntent {
        let lean = match action {
            Action::ToggleThrust => {
                self.thrust_held = !self.thrust_held;
                Lean::Neutral
            }
            Action::LeanLeft => Lean::Left,
            Action::LeanRight => Lean::Right,
        };
        ControlIntent::new(self.thrust_held, lean)
    }
}

/// Single-slot, last-write-wins handoff between an intent producer and the
/// tick loop. Neither side ever blocks; a reader may see the same intent
/// on several ticks if the producer is slower than the loop.
#[derive(Debug, Clone, Default)]
pub struct IntentSlot {
    slot: Arc<AtomicU8>,
}

impl IntentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, intent: ControlIntent) {
        self.slot.store(intent.pack(), Ordering::Release);
    }

    pub fn latest(&self) -> ControlIntent {
        ControlIntent::unpack(self.slot.load(Ordering::Acquire))
    }
}
