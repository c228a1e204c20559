pub mod model;
pub mod view;

pub use model::{DragTracker, Menu, MenuIcon, Wheel};
pub use view::{CairoRenderer, draw};

pub const ICON_SIZE: i32 = 256;
/// Pointer travel before a press becomes a drag, in pixels.
pub const DRAG_THRESHOLD: f64 = 8.0;
/// Release speed below which a swipe is not a fling, in pixels per second.
pub const MIN_FLING_VELOCITY: f64 = 50.0;
pub const ICON_BOX_FACTOR: f64 = 0.25; // icon box side relative to the radius
pub const ICON_DISTANCE_FACTOR: f64 = 0.7; // icon center distance relative to the radius
pub const LABEL_SCALE_FACTOR: f64 = 0.35;
