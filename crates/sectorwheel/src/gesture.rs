use crate::hit::Point;

/// Single-pointer gestures, already classified by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown(Point),
    /// `dx`/`dy` are scroll distances: previous position minus current position.
    DragTick { dx: f64, dy: f64, pointer: Point },
    /// Velocity in pixels per second, in the direction of motion.
    FlingStart { vx: f64, vy: f64, pointer: Point },
    PointerUp { pointer: Point, was_drag_or_fling: bool },
}
