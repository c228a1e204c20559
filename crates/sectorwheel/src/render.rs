//! What a rendering backend needs to paint the wheel.
//!
//! Painting follows a rotating-canvas model: rotate the canvas around the
//! circle's center by [`Frame::rotation`], then for each arc fill a pie
//! slice from [`Frame::arc_origin`] over its sweep, draw its icon, and rotate
//! the canvas by that sweep before the next arc.

use crate::hit::Circle;
use crate::sector::{ItemId, MenuItem};

#[derive(Debug, Clone, PartialEq)]
pub struct PieColors<C> {
    pub pie: C,
    pub selected: C,
}

impl<C> PieColors<C> {
    pub fn new(pie: C, selected: C) -> Self {
        Self { pie, selected }
    }

    pub fn for_item<I>(&self, item: &MenuItem<I>) -> &C {
        if item.is_selected() {
            &self.selected
        } else {
            &self.pie
        }
    }
}

#[derive(Debug)]
pub struct ArcPaint<'a, I, C> {
    pub id: ItemId,
    pub sweep_angle: i32,
    pub color: &'a C,
    pub icon: &'a I,
}

#[derive(Debug)]
pub struct Frame<'a, I, C> {
    pub circle: Circle,
    /// Canvas rotation in degrees, clockwise.
    pub rotation: i32,
    /// Start angle of every arc relative to the rotated canvas.
    pub arc_origin: i32,
    pub arcs: Vec<ArcPaint<'a, I, C>>,
}

impl<'a, I, C> Frame<'a, I, C> {
    pub fn build(
        circle: Circle,
        current_angle: i32,
        setup_angle: i32,
        items: &'a [MenuItem<I>],
        colors: &'a PieColors<C>,
    ) -> Self {
        let arcs = items
            .iter()
            .map(|item| ArcPaint {
                id: item.id(),
                sweep_angle: item.sweep_angle(),
                color: colors.for_item(item),
                icon: item.icon(),
            })
            .collect();

        Self {
            circle,
            rotation: current_angle + setup_angle,
            arc_origin: setup_angle,
            arcs,
        }
    }

    /// Absolute on-screen start angle of each arc, in `[0, 360)`.
    pub fn absolute_starts(&self) -> Vec<i32> {
        self.arcs
            .iter()
            .scan(self.rotation + self.arc_origin, |cursor, arc| {
                let start = crate::angle::normalize(*cursor);
                *cursor += arc.sweep_angle;
                Some(start)
            })
            .collect()
    }
}

pub trait RenderBackend<I> {
    type Color;
    type Error;

    fn paint(&mut self, frame: &Frame<'_, I, Self::Color>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::Point;
    use crate::sector::{LayoutMode, SectorLayout, SectorModel};

    #[test]
    fn test_frame_lists_arcs_in_insertion_order() {
        let mut model = SectorModel::new(SectorLayout::new(LayoutMode::Plain));
        model.populate(["a", "b", "c", "d"]);
        let geometry = model.recompute(30).unwrap();
        let colors = PieColors::new('p', 's');
        let circle = Circle::new(Point::new(100.0, 100.0), 50.0);

        let frame = Frame::build(circle, 30, geometry.setup_angle, model.items(), &colors);

        assert_eq!(frame.rotation, 30);
        assert_eq!(frame.arc_origin, 0);
        assert_eq!(frame.absolute_starts(), vec![30, 120, 210, 300]);
        let painted: Vec<_> = frame.arcs.iter().map(|arc| (*arc.icon, *arc.color)).collect();
        assert_eq!(painted, vec![("a", 'p'), ("b", 'p'), ("c", 'p'), ("d", 's')]);
    }
}
