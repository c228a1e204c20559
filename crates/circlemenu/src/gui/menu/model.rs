use crate::config::{Config, ItemConfig};
use crate::gui::menu::{DRAG_THRESHOLD, ICON_SIZE, MIN_FLING_VELOCITY};
use gdk_pixbuf::Pixbuf;
use palette::Srgba;
use sectorwheel::fling::Scroller;
use sectorwheel::gesture::GestureEvent;
use sectorwheel::icon::find_icon_path;
use sectorwheel::render::PieColors;
use sectorwheel::rotation::MenuAction;
use sectorwheel::{Point, RotationController};

pub type Wheel = RotationController<MenuIcon>;

#[derive(Clone, Default)]
pub struct MenuIcon {
    pub label: Option<String>,
    pub pixbuf: Option<Pixbuf>,
}

impl MenuIcon {
    pub fn from_config(cfg: &ItemConfig) -> Self {
        let pixbuf = find_icon_path(&cfg.icon).and_then(|path| {
            Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
                .map_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
                .ok()
        });
        Self {
            label: cfg.label.clone(),
            pixbuf,
        }
    }

    pub fn text_only(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            pixbuf: None,
        }
    }
}

pub struct Menu {
    pub wheel: Wheel,
    pub colors: PieColors<Srgba<f64>>,
    pub backdrop: Srgba<f64>,
    pending: Vec<MenuIcon>,
    size: Option<(f64, f64)>,
}

impl Menu {
    pub fn from_config(config: &Config) -> Self {
        let icons = config.items.iter().map(MenuIcon::from_config).collect();
        Self::new(config, icons)
    }

    pub fn new(config: &Config, icons: Vec<MenuIcon>) -> Self {
        let wheel = RotationController::with_simulator(
            config.rotation_settings(),
            Scroller::new(config.fling_deceleration),
        );
        Self {
            wheel,
            colors: config.pie_colors(),
            backdrop: config.backdrop_color.0,
            pending: icons,
            size: None,
        }
    }

    /// The sectors are only populated once the widget has a size.
    pub fn resize(&mut self, width: f64, height: f64) -> MenuAction {
        self.size = Some((width, height));
        let icons = std::mem::take(&mut self.pending);
        self.wheel
            .on_size_assigned(width, height, icons)
            .unwrap_or_else(|e| {
                log::error!("Failed to lay out menu: {}", e);
                MenuAction::default()
            })
    }

    /// Swaps in a wheel built from `config`, keeping the size and rotation.
    pub fn reload(&mut self, config: &Config, icons: Vec<MenuIcon>) -> MenuAction {
        let angle = self.wheel.state().current_angle;
        let size = self.size;
        *self = Self::new(config, icons);

        let Some((width, height)) = size else {
            return MenuAction::default();
        };
        let action = self.resize(width, height);
        if self.wheel.model().is_empty() {
            return action;
        }
        self.wheel.set_rotation(angle)
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }
}

/// Turns `GestureDrag` offsets into engine gestures.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    origin: Point,
    offset: (f64, f64),
    moved: bool,
}

impl DragTracker {
    pub fn begin(&mut self, origin: Point) -> GestureEvent {
        *self = Self {
            origin,
            ..Self::default()
        };
        GestureEvent::PointerDown(origin)
    }

    /// Offsets are relative to the press position. Nothing is reported until
    /// the pointer has left the threshold.
    pub fn update(&mut self, offset_x: f64, offset_y: f64) -> Option<GestureEvent> {
        if !self.moved && offset_x.hypot(offset_y) < DRAG_THRESHOLD {
            return None;
        }
        self.moved = true;

        let (last_x, last_y) = self.offset;
        self.offset = (offset_x, offset_y);
        Some(GestureEvent::DragTick {
            dx: last_x - offset_x,
            dy: last_y - offset_y,
            pointer: self.pointer(),
        })
    }

    pub fn end(&mut self, offset_x: f64, offset_y: f64) -> GestureEvent {
        if self.moved {
            self.offset = (offset_x, offset_y);
        }
        GestureEvent::PointerUp {
            pointer: self.pointer(),
            was_drag_or_fling: self.moved,
        }
    }

    pub fn swipe(&self, velocity_x: f64, velocity_y: f64) -> Option<GestureEvent> {
        (self.moved && velocity_x.hypot(velocity_y) >= MIN_FLING_VELOCITY).then(|| {
            GestureEvent::FlingStart {
                vx: velocity_x,
                vy: velocity_y,
                pointer: self.pointer(),
            }
        })
    }

    pub fn pointer(&self) -> Point {
        Point::new(self.origin.x + self.offset.0, self.origin.y + self.offset.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectorwheel::ItemId;

    fn icons(labels: &[&str]) -> Vec<MenuIcon> {
        labels.iter().map(|l| MenuIcon::text_only(l)).collect()
    }

    #[test]
    fn test_menu_populates_on_first_resize() {
        let config = Config::default();
        let mut menu = Menu::new(&config, icons(&["a", "b", "c", "d"]));
        assert!(menu.wheel.model().is_empty());
        assert!(menu.wheel.circle().is_none());

        let action = menu.resize(400.0, 400.0);
        assert!(action.should_redraw);
        assert_eq!(menu.wheel.model().len(), 4);
        assert_eq!(menu.wheel.state().current_angle, 225);

        // later resizes keep the sectors
        menu.resize(300.0, 500.0);
        assert_eq!(menu.wheel.model().len(), 4);
        assert_eq!(menu.wheel.circle().map(|c| c.radius), Some(100.0));
    }

    #[test]
    fn test_menu_without_items_reports_nothing_to_draw() {
        let mut menu = Menu::new(&Config::default(), Vec::new());
        assert_eq!(menu.resize(400.0, 400.0), MenuAction::default());
    }

    #[test]
    fn test_reload_keeps_rotation_and_size() {
        let config = Config::default();
        let mut menu = Menu::new(&config, icons(&["a", "b", "c", "d"]));
        menu.resize(400.0, 400.0);
        menu.wheel.set_rotation(30);

        let action = menu.reload(&config, icons(&["x", "y"]));
        assert!(action.should_redraw);
        assert_eq!(menu.size(), Some((400.0, 400.0)));
        assert_eq!(menu.wheel.model().len(), 2);
        assert_eq!(menu.wheel.state().current_angle, 30);
        assert_eq!(menu.wheel.model().selected(), Some(ItemId::new(2)));
    }

    #[test]
    fn test_reload_before_first_resize_defers_population() {
        let config = Config::default();
        let mut menu = Menu::new(&config, icons(&["a"]));
        assert_eq!(menu.reload(&config, icons(&["x", "y"])), MenuAction::default());

        menu.resize(200.0, 200.0);
        assert_eq!(menu.wheel.model().len(), 2);
    }

    #[test]
    fn test_short_press_is_a_tap() {
        let mut tracker = DragTracker::default();
        let origin = Point::new(100.0, 100.0);

        assert_eq!(tracker.begin(origin), GestureEvent::PointerDown(origin));
        assert_eq!(tracker.update(3.0, 4.0), None);
        assert_eq!(
            tracker.end(3.0, 4.0),
            GestureEvent::PointerUp {
                pointer: origin,
                was_drag_or_fling: false,
            }
        );
        assert_eq!(tracker.swipe(500.0, 0.0), None);
    }

    #[test]
    fn test_drag_reports_scroll_distances() {
        let mut tracker = DragTracker::default();
        tracker.begin(Point::new(100.0, 100.0));

        assert_eq!(
            tracker.update(10.0, 0.0),
            Some(GestureEvent::DragTick {
                dx: -10.0,
                dy: 0.0,
                pointer: Point::new(110.0, 100.0),
            })
        );
        // once moving, small steps count
        assert_eq!(
            tracker.update(12.0, 1.0),
            Some(GestureEvent::DragTick {
                dx: -2.0,
                dy: -1.0,
                pointer: Point::new(112.0, 101.0),
            })
        );
        assert_eq!(
            tracker.end(12.0, 1.0),
            GestureEvent::PointerUp {
                pointer: Point::new(112.0, 101.0),
                was_drag_or_fling: true,
            }
        );
    }

    #[test]
    fn test_swipe_needs_movement_and_speed() {
        let mut tracker = DragTracker::default();
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(20.0, 0.0);

        assert_eq!(tracker.swipe(30.0, 30.0), None);
        assert_eq!(
            tracker.swipe(300.0, -40.0),
            Some(GestureEvent::FlingStart {
                vx: 300.0,
                vy: -40.0,
                pointer: Point::new(20.0, 0.0),
            })
        );

        // a new press starts clean
        tracker.begin(Point::new(5.0, 5.0));
        assert_eq!(tracker.swipe(300.0, 0.0), None);
    }
}
