// Flight envelope defaults (world units per tick)
pub const FLOOR_SPEED: f64 = 0.7;
pub const SPEED_UP_FACTOR: f64 = 1.02;
pub const FALL_ACCEL_FACTOR: f64 = 1.05;
pub const DECEL_FACTOR: f64 = 0.965;
pub const MAX_SPEED: f64 = 5.0;

// Lean defaults
pub const ANGLE_LIMIT_DEG: f64 = 35.0;
pub const ANGLE_STEP_DEG: f64 = 0.3;
pub const ANGLE_DECAY_STEP_DEG: f64 = 0.2;
// Lean residue below this snaps to zero
pub const LEAN_EPSILON_DEG: f64 = 1e-9;

// Ground contact: 0.0 keeps the floor check bit-exact
pub const GROUND_TOLERANCE: f64 = 0.0;

// World and vehicle geometry
pub const WORLD_WIDTH: f64 = 1000.0;
pub const WORLD_HEIGHT: f64 = 750.0;
pub const VEHICLE_WIDTH: f64 = 30.0;
pub const VEHICLE_HEIGHT: f64 = 50.0;

// Simulation parameters
pub const TICKS_PER_SECOND: u32 = 60;
pub const MAX_SIMULATION_TICKS: u64 = 3_600;
pub const PILOT_DECISION_INTERVAL: u32 = 10;
