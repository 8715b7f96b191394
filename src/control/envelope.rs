use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ANGLE_DECAY_STEP_DEG, ANGLE_LIMIT_DEG, ANGLE_STEP_DEG, DECEL_FACTOR, FALL_ACCEL_FACTOR,
    FLOOR_SPEED, GROUND_TOLERANCE, MAX_SPEED, SPEED_UP_FACTOR,
};
use crate::errors::SimulationError;

/// Raw, unvalidated envelope values as they appear in a config document.
/// Missing fields fall back to the defaults in `constants`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeConfig {
    pub floor_speed: f64,
    pub speed_up_factor: f64,
    pub fall_accel_factor: f64,
    pub decel_factor: f64,
    pub max_speed: f64,
    pub angle_limit_deg: f64,
    pub angle_step_deg: f64,
    pub angle_decay_step_deg: f64,
    /// Falls back to `max_speed` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_to_lateral_divisor: Option<f64>,
    pub ground_tolerance: f64,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        EnvelopeConfig {
            floor_speed: FLOOR_SPEED,
            speed_up_factor: SPEED_UP_FACTOR,
            fall_accel_factor: FALL_ACCEL_FACTOR,
            decel_factor: DECEL_FACTOR,
            max_speed: MAX_SPEED,
            angle_limit_deg: ANGLE_LIMIT_DEG,
            angle_step_deg: ANGLE_STEP_DEG,
            angle_decay_step_deg: ANGLE_DECAY_STEP_DEG,
            lean_to_lateral_divisor: None,
            ground_tolerance: GROUND_TOLERANCE,
        }
    }
}

/// Immutable tuning for one vehicle class. Only constructible through
/// validation, so a governor never sees an out-of-range constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeConfig", into = "EnvelopeConfig")]
pub struct FlightEnvelope {
    config: EnvelopeConfig,
}

impl FlightEnvelope {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        floor_speed: f64,
        speed_up_factor: f64,
        fall_accel_factor: f64,
        decel_factor: f64,
        max_speed: f64,
        angle_limit_deg: f64,
        angle_step_deg: f64,
        angle_decay_step_deg: f64,
        lean_to_lateral_divisor: f64,
    ) -> Result<Self, SimulationError> {
        Self::try_from(EnvelopeConfig {
            floor_speed,
            speed_up_factor,
            fall_accel_factor,
            decel_factor,
            max_speed,
            angle_limit_deg,
            angle_step_deg,
            angle_decay_step_deg,
            lean_to_lateral_divisor: Some(lean_to_lateral_divisor),
            ground_tolerance: GROUND_TOLERANCE,
        })
    }

    /// Replaces the bit-exact floor check with `|y - floor| <= tolerance`.
    pub fn with_ground_tolerance(self, tolerance: f64) -> Result<Self, SimulationError> {
        Self::try_from(EnvelopeConfig {
            ground_tolerance: tolerance,
            ..self.config
        })
    }

    pub fn from_json(document: &str) -> Result<Self, SimulationError> {
        let config: EnvelopeConfig = serde_json::from_str(document)
            .map_err(|e| SimulationError::ConfigError(format!("malformed envelope: {}", e)))?;
        let envelope = Self::try_from(config)?;
        debug!("Loaded flight envelope: {:?}", envelope.config);
        Ok(envelope)
    }

    pub fn floor_speed(&self) -> f64 {
        self.config.floor_speed
    }

    pub fn speed_up_factor(&self) -> f64 {
        self.config.speed_up_factor
    }

    pub fn fall_accel_factor(&self) -> f64 {
        self.config.fall_accel_factor
    }

    pub fn decel_factor(&self) -> f64 {
        self.config.decel_factor
    }

    pub fn max_speed(&self) -> f64 {
        self.config.max_speed
    }

    pub fn angle_limit_deg(&self) -> f64 {
        self.config.angle_limit_deg
    }

    pub fn angle_step_deg(&self) -> f64 {
        self.config.angle_step_deg
    }

    pub fn angle_decay_step_deg(&self) -> f64 {
        self.config.angle_decay_step_deg
    }

    pub fn lean_to_lateral_divisor(&self) -> f64 {
        self.config
            .lean_to_lateral_divisor
            .unwrap_or(self.config.max_speed)
    }

    pub fn ground_tolerance(&self) -> f64 {
        self.config.ground_tolerance
    }

    fn validate(config: &EnvelopeConfig) -> Result<(), SimulationError> {
        let fields = [
            ("floorSpeed", config.floor_speed),
            ("speedUpFactor", config.speed_up_factor),
            ("fallAccelFactor", config.fall_accel_factor),
            ("decelFactor", config.decel_factor),
            ("maxSpeed", config.max_speed),
            ("angleLimitDeg", config.angle_limit_deg),
            ("angleStepDeg", config.angle_step_deg),
            ("angleDecayStepDeg", config.angle_decay_step_deg),
            (
                "leanToLateralDivisor",
                config.lean_to_lateral_divisor.unwrap_or(config.max_speed),
            ),
            ("groundTolerance", config.ground_tolerance),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(config_error(format!("{} must be finite, got {}", name, value)));
        }

        if config.floor_speed <= 0.0 {
            return Err(config_error(format!(
                "floorSpeed must be > 0, got {}",
                config.floor_speed
            )));
        }
        if config.decel_factor <= 0.0 || config.decel_factor >= 1.0 {
            return Err(config_error(format!(
                "decelFactor must be in (0, 1), got {}",
                config.decel_factor
            )));
        }
        if config.speed_up_factor <= 1.0 {
            return Err(config_error(format!(
                "speedUpFactor must be > 1, got {}",
                config.speed_up_factor
            )));
        }
        if config.fall_accel_factor <= 1.0 {
            return Err(config_error(format!(
                "fallAccelFactor must be > 1, got {}",
                config.fall_accel_factor
            )));
        }
        if config.max_speed <= config.floor_speed {
            return Err(config_error(format!(
                "maxSpeed ({}) must exceed floorSpeed ({})",
                config.max_speed, config.floor_speed
            )));
        }

        let positive = [
            ("angleLimitDeg", config.angle_limit_deg),
            ("angleStepDeg", config.angle_step_deg),
            ("angleDecayStepDeg", config.angle_decay_step_deg),
            (
                "leanToLateralDivisor",
                config.lean_to_lateral_divisor.unwrap_or(config.max_speed),
            ),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(config_error(format!("{} must be > 0, got {}", name, value)));
        }

        if config.ground_tolerance < 0.0 {
            return Err(config_error(format!(
                "groundTolerance must be >= 0, got {}",
                config.ground_tolerance
            )));
        }

        Ok(())
    }
}

fn config_error(message: String) -> SimulationError {
    SimulationError::ConfigError(message)
}

impl Default for FlightEnvelope {
    fn default() -> Self {
        FlightEnvelope {
            config: EnvelopeConfig::default(),
        }
    }
}

impl TryFrom<EnvelopeConfig> for FlightEnvelope {
    type Error = SimulationError;

    fn try_from(config: EnvelopeConfig) -> Result<Self, Self::Error> {
        Self::validate(&config)?;
        Ok(FlightEnvelope { config })
    }
}

impl From<FlightEnvelope> for EnvelopeConfig {
    fn from(envelope: FlightEnvelope) -> Self {
        envelope.config
    }
}
