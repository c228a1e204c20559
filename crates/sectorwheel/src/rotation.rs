//! Rotation state machine driven by drag, fling and snap animation.

use crate::angle::{normalize, vector_to_scalar_scroll};
use crate::animation::{Interpolation, SelectionAnimator};
use crate::error::MenuError;
use crate::fling::{BallisticSimulator, Scroller};
use crate::gesture::GestureEvent;
use crate::hit::{Circle, HitTester, Point};
use crate::render::{Frame, PieColors, RenderBackend};
use crate::sector::{ItemId, SectorLayout, SectorModel};
use std::time::Instant;

/// Drag and fling motion is divided by this before it becomes degrees.
pub const FLING_VELOCITY_DOWNSCALE: i32 = 22;
/// Inset between the widget edge and the circle, in pixels.
pub const DEFAULT_BORDER: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    /// Unbounded while dragging; normalized by every other mutation.
    pub current_angle: i32,
    pub setup_angle: i32,
    pub rest_angle: i32,
    pub is_dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuAction {
    pub should_redraw: bool,
    pub needs_ticks: bool,
}

impl MenuAction {
    pub fn new(should_redraw: bool, needs_ticks: bool) -> Self {
        Self {
            should_redraw,
            needs_ticks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSettings {
    pub layout: SectorLayout,
    pub animator: SelectionAnimator,
    pub drag_downscale: i32,
    /// Multiplier applied to projected drag and fling motion.
    pub scroll_gain: f64,
    pub border: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            layout: SectorLayout::default(),
            animator: SelectionAnimator::default(),
            drag_downscale: FLING_VELOCITY_DOWNSCALE,
            scroll_gain: 1.0,
            border: DEFAULT_BORDER,
        }
    }
}

pub struct RotationController<I, S = Scroller> {
    state: MenuState,
    model: SectorModel<I>,
    hit: Option<HitTester>,
    settings: RotationSettings,
    simulator: S,
    flinging: bool,
    snap: Option<Interpolation>,
    /// Projected scroll since the drag began, and the degrees already applied from it.
    drag_scroll: f64,
    drag_steps: i32,
}

impl<I> RotationController<I, Scroller> {
    pub fn new(settings: RotationSettings) -> Self {
        Self::with_simulator(settings, Scroller::default())
    }
}

impl<I, S: BallisticSimulator> RotationController<I, S> {
    pub fn with_simulator(settings: RotationSettings, simulator: S) -> Self {
        Self {
            state: MenuState::default(),
            model: SectorModel::new(settings.layout),
            hit: None,
            settings,
            simulator,
            flinging: false,
            snap: None,
            drag_scroll: 0.0,
            drag_steps: 0,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn model(&self) -> &SectorModel<I> {
        &self.model
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    pub fn circle(&self) -> Option<Circle> {
        self.hit.map(|hit| hit.circle())
    }

    pub fn is_flinging(&self) -> bool {
        self.flinging
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.flinging || self.snap.is_some()
    }

    /// Sizes the circle to the widget and, on the first call, populates the
    /// sectors with `icons`. Later calls only resize.
    pub fn on_size_assigned(
        &mut self,
        width: f64,
        height: f64,
        icons: impl IntoIterator<Item = I>,
    ) -> Result<MenuAction, MenuError> {
        self.hit = Some(HitTester::new(Circle::from_size(
            width,
            height,
            self.settings.border,
        )));

        if self.model.is_empty() {
            self.model.populate(icons);
            if self.model.is_empty() {
                return Err(MenuError::Empty);
            }
            let count = self.model.len() as i32;
            self.state.current_angle = 270 - 180 / count;
            log::debug!(
                "populated {} sectors, initial rotation {}",
                count,
                self.state.current_angle
            );
        }

        self.recompute()?;
        Ok(MenuAction::new(true, self.is_animating()))
    }

    /// Points the menu at `angle`, normalized.
    pub fn set_rotation(&mut self, angle: i32) -> MenuAction {
        self.state.current_angle = normalize(angle);
        self.refresh()
    }

    pub fn handle(&mut self, event: GestureEvent, now: Instant) -> MenuAction {
        match event {
            GestureEvent::PointerDown(pointer) => {
                self.on_pointer_down(pointer);
                self.idle()
            }
            GestureEvent::DragTick { dx, dy, pointer } => self.on_drag_tick(dx, dy, pointer),
            GestureEvent::FlingStart { vx, vy, pointer } => {
                self.on_fling_start(vx, vy, pointer, now)
            }
            GestureEvent::PointerUp {
                pointer,
                was_drag_or_fling,
            } => self.on_pointer_up(pointer, was_drag_or_fling, now),
        }
    }

    /// Returns whether the press landed inside the circle. Such a press
    /// interrupts a running snap animation.
    pub fn on_pointer_down(&mut self, pointer: Point) -> bool {
        let Some(hit) = self.hit else {
            return false;
        };

        let inside = hit.is_inside(pointer);
        if inside && self.snap.take().is_some() {
            log::debug!("snap animation interrupted");
        }
        inside
    }

    pub fn on_drag_tick(&mut self, dx: f64, dy: f64, pointer: Point) -> MenuAction {
        let Some(scroll) = self.project(dx, dy, pointer) else {
            return self.idle();
        };

        if !self.state.is_dragging {
            self.cancel_motion();
            self.state.is_dragging = true;
            self.drag_scroll = 0.0;
            self.drag_steps = 0;
        }

        // floor the running total so sub-degree motion is not lost per event
        self.drag_scroll += scroll;
        let steps = self.downscale(self.drag_scroll);
        self.state.current_angle -= steps - self.drag_steps;
        self.drag_steps = steps;
        self.refresh()
    }

    pub fn on_fling_start(&mut self, vx: f64, vy: f64, pointer: Point, now: Instant) -> MenuAction {
        let Some(scroll) = self.project(vx, vy, pointer) else {
            return self.idle();
        };

        self.snap = None;
        let velocity = self.downscale(scroll);
        self.simulator.fling(
            normalize(self.state.current_angle),
            velocity,
            i32::MIN..=i32::MAX,
            now,
        );
        self.simulator.extend_duration(self.simulator.duration());
        self.flinging = !self.simulator.is_finished();

        log::debug!(
            "fling at {} deg/s over {:?}",
            velocity,
            self.simulator.duration()
        );
        MenuAction::new(false, self.flinging)
    }

    pub fn on_pointer_up(
        &mut self,
        pointer: Point,
        was_drag_or_fling: bool,
        now: Instant,
    ) -> MenuAction {
        let dragging = std::mem::take(&mut self.state.is_dragging);
        if was_drag_or_fling || dragging {
            return self.idle();
        }

        let Some(hit) = self.hit else {
            return self.idle();
        };
        if !hit.is_inside(pointer) {
            return self.idle();
        }

        match hit.classify(pointer, &self.model) {
            Some(id) => self.select(id, now).unwrap_or_else(|e| {
                log::warn!("failed to select sector {}: {}", id, e);
                self.idle()
            }),
            None => {
                log::debug!("tap at {:?} matched no sector", pointer);
                self.idle()
            }
        }
    }

    /// Selects `id` and snaps it to the home angle.
    pub fn select(&mut self, id: ItemId, now: Instant) -> Result<MenuAction, MenuError> {
        if self.hit.is_none() {
            return Err(MenuError::NotSized);
        }
        let sector_start = self
            .model
            .get(id)
            .ok_or(MenuError::UnknownItem(id))?
            .start_angle();

        self.model.apply_selection(id)?;
        self.recompute()?;
        self.cancel_motion();

        let snap = self.settings.animator.animate(
            sector_start,
            self.state.current_angle,
            self.state.setup_angle,
            now,
        );
        log::debug!("selected sector {}, snapping {} -> {}", id, snap.from, snap.to);
        self.snap = Some(snap);

        Ok(MenuAction::new(true, true))
    }

    /// Advances the fling and snap animation to `now`.
    pub fn tick(&mut self, now: Instant) -> MenuAction {
        let mut should_redraw = false;

        if self.flinging {
            let position = self.simulator.tick(now);
            should_redraw |= self.set_rotation(position).should_redraw;
            if self.simulator.is_finished() {
                self.flinging = false;
                log::trace!("fling finished at {}", self.state.current_angle);
            }
        }

        if let Some(sample) = self.snap.as_ref().map(|snap| snap.sample(now)) {
            should_redraw |= self.set_rotation(sample.value).should_redraw;
            if sample.finished {
                self.snap = None;
                log::debug!("snap finished at {}", self.state.current_angle);
            }
        }

        MenuAction::new(should_redraw, self.is_animating())
    }

    pub fn frame<'a, C>(&'a self, colors: &'a PieColors<C>) -> Option<Frame<'a, I, C>> {
        let circle = self.circle()?;
        Some(Frame::build(
            circle,
            self.state.current_angle,
            self.state.setup_angle,
            self.model.items(),
            colors,
        ))
    }

    /// Paints the current frame; a widget that has not been sized paints nothing.
    pub fn paint<B>(&self, backend: &mut B, colors: &PieColors<B::Color>) -> Result<(), B::Error>
    where
        B: RenderBackend<I>,
    {
        match self.frame(colors) {
            Some(frame) => backend.paint(&frame),
            None => Ok(()),
        }
    }

    fn project(&self, dx: f64, dy: f64, pointer: Point) -> Option<f64> {
        let hit = self.hit?;
        if self.model.is_empty() {
            return None;
        }
        let radius = pointer - hit.circle().center;
        Some(vector_to_scalar_scroll(dx, dy, radius.x, radius.y) * self.settings.scroll_gain)
    }

    fn downscale(&self, scroll: f64) -> i32 {
        let divisor = self.settings.drag_downscale.max(1) as f64;
        (scroll / divisor).floor() as i32
    }

    /// Nothing to redraw, but a running fling or snap keeps its ticks.
    fn idle(&self) -> MenuAction {
        MenuAction::new(false, self.is_animating())
    }

    fn cancel_motion(&mut self) {
        if self.flinging {
            self.simulator.abort();
            self.flinging = false;
        }
        self.snap = None;
    }

    fn recompute(&mut self) -> Result<(), MenuError> {
        let geometry = self.model.recompute(self.state.current_angle)?;
        self.state.setup_angle = geometry.setup_angle;
        self.state.rest_angle = geometry.rest_angle;
        Ok(())
    }

    fn refresh(&mut self) -> MenuAction {
        match self.recompute() {
            Ok(()) => MenuAction::new(true, self.is_animating()),
            Err(e) => {
                log::debug!("skipping redraw: {}", e);
                MenuAction::new(false, self.is_animating())
            }
        }
    }
}
