//! Integer-degree angle helpers shared by the sector model, hit tester and
//! rotation controller.
//!
//! Angles follow screen conventions: 0° points along +x, and angles grow
//! clockwise because +y points down.

pub const FULL_TURN: i32 = 360;
pub const HALF_TURN: i32 = 180;

/// Reduces `angle` into `[0, 360)` using floored modulo.
pub fn normalize(angle: i32) -> i32 {
    angle.rem_euclid(FULL_TURN)
}

/// Projects a motion vector `(dx, dy)` onto the tangent of the circle at the
/// radius vector `(x, y)`.
///
/// The magnitude is the length of the motion, the sign says which way the
/// motion turns around the center. Purely radial motion yields `0.0`.
pub fn vector_to_scalar_scroll(dx: f64, dy: f64, x: f64, y: f64) -> f64 {
    let length = dx.hypot(dy);

    // perpendicular of the radius vector
    let (cross_x, cross_y) = (-y, x);
    let dot = cross_x * dx + cross_y * dy;

    length * sign(dot)
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Polar angle of `(dx, dy)` in whole degrees within `[0, 360)`.
pub fn polar_angle(dx: f64, dy: f64) -> i32 {
    let degrees = dy.atan2(dx).to_degrees() as i32;
    if degrees < 0 {
        degrees + FULL_TURN
    } else {
        degrees
    }
}

/// Adjusts a `(current, target)` pair of normalized angles so that travelling
/// from one to the other never crosses more than half a turn.
pub fn shortest_path(current: i32, target: i32) -> (i32, i32) {
    if (current - target).abs() <= HALF_TURN {
        return (current, target);
    }

    if current > target {
        (current - FULL_TURN, target)
    } else {
        (current, target - FULL_TURN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_handles_negative_and_large_angles() {
        assert_eq!(normalize(0), 0);
        assert_eq!(normalize(360), 0);
        assert_eq!(normalize(-10), 350);
        assert_eq!(normalize(-370), 350);
        assert_eq!(normalize(725), 5);
    }

    #[test]
    fn test_normalize_is_idempotent_and_periodic() {
        for x in (-1440..=1440).step_by(7) {
            let n = normalize(x);
            assert!((0..FULL_TURN).contains(&n));
            assert_eq!(normalize(n), n);
            assert_eq!(normalize(x + FULL_TURN), n);
        }
    }

    #[test]
    fn test_scroll_below_center_moving_right_is_negative() {
        let scroll = vector_to_scalar_scroll(10.0, 0.0, 0.0, 40.0);
        assert_eq!(scroll, -10.0);
    }

    #[test]
    fn test_scroll_above_center_moving_right_is_positive() {
        let scroll = vector_to_scalar_scroll(3.0, 4.0, 0.0, -40.0);
        assert_eq!(scroll, 5.0);
    }

    #[test]
    fn test_radial_motion_does_not_scroll() {
        assert_eq!(vector_to_scalar_scroll(0.0, 10.0, 0.0, 40.0), 0.0);
        assert_eq!(vector_to_scalar_scroll(-5.0, 0.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn test_polar_angle_covers_all_quadrants() {
        assert_eq!(polar_angle(10.0, 0.0), 0);
        assert_eq!(polar_angle(0.0, 10.0), 90);
        assert_eq!(polar_angle(-10.0, 0.0), 180);
        assert_eq!(polar_angle(0.0, -10.0), 270);
        assert_eq!(polar_angle(10.0, -10.0), 315);
    }

    #[test]
    fn test_shortest_path_wraps_the_target() {
        assert_eq!(shortest_path(10, 350), (10, -10));
    }

    #[test]
    fn test_shortest_path_wraps_the_current() {
        assert_eq!(shortest_path(350, 10), (-10, 10));
    }

    #[test]
    fn test_shortest_path_never_exceeds_half_turn() {
        for current in (0..FULL_TURN).step_by(5) {
            for target in (0..FULL_TURN).step_by(5) {
                let (from, to) = shortest_path(current, target);
                assert!((to - from).abs() <= HALF_TURN, "{current} -> {target}");
                assert_eq!(normalize(from), current);
                assert_eq!(normalize(to), target);
            }
        }
    }
}
