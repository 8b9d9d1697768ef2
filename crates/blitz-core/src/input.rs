//! Translating raw pointer and stick input into movement intents.
//!
//! Both helpers are pure; the caller feeds the result to
//! [`World::set_human_target`](crate::state::World::set_human_target) or
//! [`World::set_human_steering`](crate::state::World::set_human_steering).

use blitz_types::{Position, Vector};

/// Stick travel, in screen pixels, that maps to full speed.
pub const STICK_MAX_RADIUS: f64 = 44.0;

/// Fraction of travel ignored around the stick center.
pub const STICK_DEADZONE: f64 = 0.08;

/// Exponent applied past the deadzone for finer control at low speed.
pub const STICK_CURVE: f64 = 1.2;

/// A screen-space rectangle the arena is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in screen pixels.
    pub left: f64,
    /// Top edge in screen pixels.
    pub top: f64,
    /// Width in screen pixels.
    pub width: f64,
    /// Height in screen pixels.
    pub height: f64,
}

/// Convert a stick offset (pixels from the stick center) into a steering
/// vector with magnitude in `[0, 1]`.
///
/// Travel is capped at [`STICK_MAX_RADIUS`]. Anything inside the deadzone
/// is zero; the rest is rescaled to `[0, 1]` and bent by [`STICK_CURVE`].
pub fn shape_stick(offset: Vector) -> Vector {
    let distance = offset.magnitude();
    if !distance.is_finite() || distance <= f64::EPSILON {
        return Vector::ZERO;
    }
    let raw = distance.min(STICK_MAX_RADIUS) / STICK_MAX_RADIUS;
    if raw <= STICK_DEADZONE {
        return Vector::ZERO;
    }
    let magnitude = ((raw - STICK_DEADZONE) / (1.0 - STICK_DEADZONE)).powf(STICK_CURVE);
    let direction = offset.normalized_or(Vector::ZERO);
    Vector::new(direction.dx * magnitude, direction.dy * magnitude)
}

/// Map a pointer position on screen into arena coordinates, clamped into
/// the arena. Returns `None` for an empty viewport.
pub fn pointer_to_arena(pointer: Position, viewport: Viewport) -> Option<Position> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    Some(
        Position::new(
            (pointer.x - viewport.left) / viewport.width * 100.0,
            (pointer.y - viewport.top) / viewport.height * 100.0,
        )
        .clamped(),
    )
}
