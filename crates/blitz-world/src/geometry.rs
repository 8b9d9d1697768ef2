//! Distance and seek primitives shared by every other component.

use blitz_types::{Position, Vector};

/// Direction used when a bounce or steer has no defined direction
/// (the two points coincide).
pub const FALLBACK_AXIS: Vector = Vector::new(0.0, 1.0);

/// Straight-line distance between two points.
pub fn distance(a: Position, b: Position) -> f64 {
    a.distance_to(b)
}

/// Move from `current` toward `target` by at most `speed`.
///
/// When the remaining distance is at most `speed` the result is exactly
/// `target`, so repeated calls settle instead of oscillating. A zero
/// distance returns `target` without dividing by zero. A non-finite
/// distance leaves `current` where it is.
pub fn move_toward(current: Position, target: Position, speed: f64) -> Position {
    let delta = current.vector_to(target);
    let dist = delta.magnitude();
    if !dist.is_finite() {
        return current;
    }
    if dist <= speed || dist <= f64::EPSILON {
        return target;
    }
    current.offset(delta, speed / dist)
}

/// Unit vector pointing from `origin` toward `point`, or [`FALLBACK_AXIS`]
/// when the two coincide.
pub fn direction_from(origin: Position, point: Position) -> Vector {
    origin.vector_to(point).normalized_or(FALLBACK_AXIS)
}

/// Advance `position` along a steering vector at `speed` units per tick,
/// clamped into the arena.
pub fn integrate(position: Position, steering: Vector, speed: f64) -> Position {
    position.offset(steering.capped_to_unit(), speed).clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn move_toward_steps_by_speed() {
        let next = move_toward(Position::new(0.0, 0.0), Position::new(10.0, 0.0), 0.25);
        assert!(approx(next.x, 0.25));
        assert!(approx(next.y, 0.0));
    }

    #[test]
    fn move_toward_snaps_when_close() {
        let target = Position::new(10.0, 10.0);
        let next = move_toward(Position::new(9.9, 10.0), target, 0.25);
        assert_eq!(next, target);
    }

    #[test]
    fn seek_is_idempotent_at_target() {
        let target = Position::new(42.0, 17.0);
        let mut pos = target;
        for _ in 0..50 {
            pos = move_toward(pos, target, 0.375);
        }
        assert_eq!(pos, target);
    }

    #[test]
    fn move_toward_ignores_non_finite_target() {
        let start = Position::new(20.0, 30.0);
        assert_eq!(move_toward(start, Position::new(f64::NAN, 50.0), 0.25), start);
        assert_eq!(move_toward(start, Position::new(f64::INFINITY, 0.0), 0.25), start);
    }

    #[test]
    fn move_toward_never_overshoots() {
        let target = Position::new(1.0, 1.0);
        let mut pos = Position::new(0.0, 0.0);
        for _ in 0..20 {
            let before = pos.distance_to(target);
            pos = move_toward(pos, target, 0.3);
            assert!(pos.distance_to(target) <= before);
        }
        assert_eq!(pos, target);
    }

    #[test]
    fn direction_of_coincident_points_uses_fallback() {
        let p = Position::new(50.0, 88.0);
        assert_eq!(direction_from(p, p), FALLBACK_AXIS);
        let d = direction_from(p, Position::new(50.0, 78.0));
        assert!(approx(d.dx, 0.0));
        assert!(approx(d.dy, -1.0));
    }

    #[test]
    fn integrate_clamps_to_arena() {
        let next = integrate(Position::new(99.9, 50.0), Vector::new(1.0, 0.0), 0.25);
        assert!(approx(next.x, 100.0));
        let still = integrate(Position::new(30.0, 30.0), Vector::ZERO, 0.25);
        assert_eq!(still, Position::new(30.0, 30.0));
    }

    #[test]
    fn distance_matches_position_method() {
        let a = Position::new(17.0, 31.0);
        let b = Position::new(50.0, 50.0);
        assert!(approx(distance(a, b), a.distance_to(b)));
    }
}
