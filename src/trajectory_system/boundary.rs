//! Position clamping against world extents.
//!
//! The same upper bound doubles as the floor target of the ground check, so
//! a body clamped onto the floor lands on exactly the value the next tick
//! compares against.

/// Largest position a body of `extent` may take inside `world_extent`.
pub fn max_position(extent: f64, world_extent: f64) -> f64 {
    world_extent - extent
}

/// Clamps `position` to `[0, world_extent - extent]`.
///
/// Callers must ensure `extent <= world_extent`; the governor rejects
/// vehicles larger than the world before clamping.
pub fn clamp(position: f64, extent: f64, world_extent: f64) -> f64 {
    let upper = max_position(extent, world_extent);
    if position < 0.0 {
        0.0
    } else if position > upper {
        upper
    } else {
        position
    }
}
