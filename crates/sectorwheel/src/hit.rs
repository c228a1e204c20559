//! Resolving pointer positions against the circle and its sectors.

use crate::angle::{FULL_TURN, normalize, polar_angle};
use crate::sector::{ItemId, MenuItem, SectorModel};
use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Largest circle that fits a `width` x `height` widget, inset by
    /// `border` on every side and anchored to the top-left corner.
    pub fn from_size(width: f64, height: f64, border: f64) -> Self {
        let side = width.min(height);
        let center = Point::new(side / 2.0, side / 2.0);
        let radius = ((side - 2.0 * border) / 2.0).max(0.0);
        Self { center, radius }
    }

    pub fn contains(&self, point: Point) -> bool {
        is_inside_circle(point, self.center, self.radius)
    }
}

pub fn is_inside_circle(point: Point, center: Point, radius: f64) -> bool {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    radius * radius >= dx * dx + dy * dy
}

/// Returns the first sector, in insertion order, whose closed angular range
/// contains the polar angle of `point` around `center`.
pub fn classify<I>(point: Point, center: Point, items: &[MenuItem<I>]) -> Option<ItemId> {
    let offset = point - center;
    let angle = polar_angle(offset.x, offset.y);

    items
        .iter()
        .find(|item| sector_contains(item.start_angle(), item.sweep_angle(), angle))
        .map(MenuItem::id)
}

fn sector_contains(start: i32, sweep: i32, angle: i32) -> bool {
    let end = start + sweep;
    if end > FULL_TURN {
        start <= angle || angle <= normalize(end)
    } else {
        start <= angle && angle <= end
    }
}

/// Hit testing bound to the circle the widget was sized to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTester {
    circle: Circle,
}

impl HitTester {
    pub fn new(circle: Circle) -> Self {
        Self { circle }
    }

    pub fn circle(&self) -> Circle {
        self.circle
    }

    pub fn is_inside(&self, point: Point) -> bool {
        self.circle.contains(point)
    }

    pub fn classify<I>(&self, point: Point, model: &SectorModel<I>) -> Option<ItemId> {
        classify(point, self.circle.center, model.items())
    }

    /// Classifies `point` and marks the matching sector as the selected one.
    pub fn hit_sector<I>(&self, point: Point, model: &mut SectorModel<I>) -> Option<ItemId> {
        let id = self.classify(point, model)?;
        model.apply_selection(id).ok()?;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::{LayoutMode, SectorLayout};

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    fn at_angle(degrees: f64, distance: f64) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            CENTER.x + distance * radians.cos(),
            CENTER.y + distance * radians.sin(),
        )
    }

    fn model(count: usize, current_angle: i32) -> SectorModel<()> {
        let mut model = SectorModel::new(SectorLayout::new(LayoutMode::Plain));
        model.populate(std::iter::repeat_n((), count));
        model.recompute(current_angle).unwrap();
        model
    }

    #[test]
    fn test_circle_membership_is_inclusive_on_the_rim() {
        assert!(is_inside_circle(Point::new(150.0, 100.0), CENTER, 50.0));
        assert!(is_inside_circle(CENTER, CENTER, 50.0));
        assert!(!is_inside_circle(Point::new(150.1, 100.0), CENTER, 50.0));
        assert!(!is_inside_circle(Point::new(140.0, 140.0), CENTER, 50.0));
    }

    #[test]
    fn test_circle_from_size_uses_the_short_side() {
        let circle = Circle::from_size(800.0, 500.0, 50.0);
        assert_eq!(circle.center, Point::new(250.0, 250.0));
        assert_eq!(circle.radius, 200.0);
    }

    #[test]
    fn test_wrapping_sector_matches_at_zero() {
        // 18 sectors of 20°, item 1 spans [350, 370] == [350, 360) + [0, 10]
        let model = model(18, 350);
        assert_eq!(model.items()[0].start_angle(), 350);

        let tester = HitTester::new(Circle::new(CENTER, 80.0));
        assert_eq!(
            tester.classify(at_angle(0.0, 40.0), &model),
            Some(ItemId::new(1))
        );
        assert_eq!(
            tester.classify(at_angle(355.5, 40.0), &model),
            Some(ItemId::new(1))
        );
        assert_eq!(
            tester.classify(at_angle(5.5, 40.0), &model),
            Some(ItemId::new(1))
        );
        assert_eq!(
            tester.classify(at_angle(15.5, 40.0), &model),
            Some(ItemId::new(2))
        );
    }

    #[test]
    fn test_boundary_goes_to_the_first_sector() {
        let model = model(4, 0);
        // sectors [0,90] [90,180] [180,270] [270,360]
        assert_eq!(
            classify(at_angle(90.0, 10.0), CENTER, model.items()),
            Some(ItemId::new(1))
        );
    }

    #[test]
    fn test_every_angle_inside_the_circle_hits_exactly_one_interior_sector() {
        for count in [1, 3, 7, 12] {
            for rotation in [0, 45, 181, 359] {
                let model = model(count, rotation);
                for step in 0..720 {
                    let degrees = step as f64 * 0.5 + 0.25;
                    let point = at_angle(degrees, 30.0);
                    let hits = model
                        .items()
                        .iter()
                        .filter(|item| {
                            let angle = polar_angle(point.x - CENTER.x, point.y - CENTER.y);
                            sector_contains(item.start_angle(), item.sweep_angle(), angle)
                        })
                        .count();
                    assert!(hits >= 1, "{count} sectors at {rotation}: {degrees}° missed");
                    assert!(classify(point, CENTER, model.items()).is_some());
                }
            }
        }
    }

    #[test]
    fn test_widened_sector_overlaps_its_neighbour_and_leaves_a_gap() {
        let mut model = SectorModel::new(SectorLayout::new(LayoutMode::Centered));
        model.populate(std::iter::repeat_n((), 7));
        model.apply_selection(ItemId::new(3)).unwrap();
        model.recompute(245).unwrap();
        // item 3 spans [107, 161], item 4 starts at 158, item 7 ends at 2, item 1 starts at 5
        assert_eq!(model.items()[2].sweep_angle(), 54);

        assert_eq!(
            classify(at_angle(159.5, 30.0), CENTER, model.items()),
            Some(ItemId::new(3))
        );
        assert_eq!(
            classify(at_angle(1.5, 30.0), CENTER, model.items()),
            Some(ItemId::new(7))
        );
        for degrees in [3.5, 4.5] {
            assert_eq!(classify(at_angle(degrees, 30.0), CENTER, model.items()), None);
        }

        let tester = HitTester::new(Circle::new(CENTER, 80.0));
        assert_eq!(tester.hit_sector(at_angle(3.5, 30.0), &mut model), None);
        assert_eq!(model.selected(), Some(ItemId::new(3)));
    }

    #[test]
    fn test_empty_items_never_match() {
        let items: Vec<MenuItem<()>> = Vec::new();
        assert_eq!(classify(at_angle(10.0, 10.0), CENTER, &items), None);
    }

    #[test]
    fn test_hit_sector_moves_the_selection() {
        let mut model = model(4, 0);
        let tester = HitTester::new(Circle::new(CENTER, 80.0));

        let hit = tester.hit_sector(at_angle(135.0, 40.0), &mut model);

        assert_eq!(hit, Some(ItemId::new(2)));
        assert_eq!(model.selected(), Some(ItemId::new(2)));
        assert_eq!(model.items().iter().filter(|i| i.is_selected()).count(), 1);
    }
}
