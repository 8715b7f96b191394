use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::errors::SimulationError;
use crate::trajectory_system::boundary;

/// Static extents of the play area. `y` grows downward, so the floor is at
/// the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub width: f64,
    pub height: f64,
}

impl World {
    pub fn new(width: f64, height: f64) -> Result<Self, SimulationError> {
        for (name, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::ConfigError(format!(
                    "World {} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        Ok(World { width, height })
    }

    /// Resting `y` of a body of the given height.
    pub fn floor_y(&self, body_height: f64) -> f64 {
        boundary::max_position(body_height, self.height)
    }

    pub fn contains(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        (0.0..=boundary::max_position(width, self.width)).contains(&x)
            && (0.0..=boundary::max_position(height, self.height)).contains(&y)
    }
}

impl Default for World {
    fn default() -> Self {
        World {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world() {
        let world = World::new(800.0, 400.0).unwrap();
        assert_eq!(world.width, 800.0);
        assert_eq!(world.height, 400.0);
    }

    #[test]
    fn test_rejects_degenerate_extents() {
        assert!(matches!(
            World::new(0.0, 400.0),
            Err(SimulationError::ConfigError(_))
        ));
        assert!(matches!(
            World::new(800.0, f64::INFINITY),
            Err(SimulationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_floor_y() {
        let world = World::default();
        assert_eq!(world.floor_y(50.0), 700.0);
        assert_eq!(world.floor_y(47.0), 703.0);
    }

    #[test]
    fn test_contains() {
        let world = World::default();
        assert!(world.contains(0.0, 0.0, 30.0, 50.0));
        assert!(world.contains(970.0, 700.0, 30.0, 50.0));
        assert!(!world.contains(970.1, 700.0, 30.0, 50.0));
        assert!(!world.contains(10.0, -0.5, 30.0, 50.0));
    }
}
