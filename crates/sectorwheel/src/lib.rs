//! Geometry and rotation-interaction engine for a circular pie menu.
//!
//! Everything here is UI independent: the host feeds pointer gestures and
//! frame times in, and paints the [`render::Frame`] it gets back.

mod macros;

pub mod angle;
pub mod animation;
pub mod control;
pub mod error;
pub mod fling;
pub mod gesture;
pub mod hit;
pub mod icon;
pub mod render;
pub mod rotation;
pub mod sector;

pub use error::MenuError;
pub use hit::{Circle, HitTester, Point};
pub use rotation::{MenuAction, MenuState, RotationController};
pub use sector::{ItemId, LayoutMode, MenuItem, SectorLayout, SectorModel};
