use super::model::{Menu, MenuIcon};
use super::{ICON_BOX_FACTOR, ICON_DISTANCE_FACTOR, ICON_SIZE, LABEL_SCALE_FACTOR};
use crate::gui::theme;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use sectorwheel::render::{Frame, RenderBackend};
use std::f64::consts::{FRAC_PI_2, PI};

fn radians(degrees: i32) -> f64 {
    (degrees as f64).to_radians()
}

/// Paints frames with cairo: pie slices on a canvas rotated around the
/// circle's center, one icon per slice.
pub struct CairoRenderer<'a> {
    cr: &'a Context,
}

impl<'a> CairoRenderer<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn draw_slice(&self, radius: f64, origin: f64, sweep: f64) -> Result<(), cairo::Error> {
        self.cr.move_to(0.0, 0.0);
        self.cr.arc(0.0, 0.0, radius, origin, origin + sweep);
        self.cr.close_path();
        self.cr.fill()
    }

    /// Centers the icon on the slice's bisector, its top facing outward.
    fn draw_content(
        &self,
        icon: &MenuIcon,
        radius: f64,
        bisector: f64,
    ) -> Result<(), cairo::Error> {
        let side = radius * ICON_BOX_FACTOR;

        self.cr.save()?;
        self.cr.rotate(bisector);
        self.cr.translate(radius * ICON_DISTANCE_FACTOR, 0.0);
        self.cr.rotate(FRAC_PI_2);

        let result = if let Some(pixbuf) = &icon.pixbuf {
            self.draw_icon(pixbuf, side)
        } else if let Some(label) = &icon.label {
            self.draw_text(label, side)
        } else {
            Ok(())
        };

        self.cr.restore()?;
        result
    }

    fn draw_icon(&self, pixbuf: &Pixbuf, side: f64) -> Result<(), cairo::Error> {
        let icon_scale = side / ICON_SIZE as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        self.cr.translate(-iw / 2.0, -ih / 2.0);
        self.cr.scale(icon_scale, icon_scale);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()
    }

    fn draw_text(&self, text: &str, side: f64) -> Result<(), cairo::Error> {
        let cr = self.cr;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(side * LABEL_SCALE_FACTOR);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(-ext.width() / 2.0, ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }
}

impl RenderBackend<MenuIcon> for CairoRenderer<'_> {
    type Color = Srgba<f64>;
    type Error = cairo::Error;

    fn paint(&mut self, frame: &Frame<'_, MenuIcon, Srgba<f64>>) -> Result<(), cairo::Error> {
        let radius = frame.circle.radius;
        let origin = radians(frame.arc_origin);

        self.cr.save()?;
        self.cr.translate(frame.circle.center.x, frame.circle.center.y);
        self.cr.rotate(radians(frame.rotation));

        for arc in &frame.arcs {
            let sweep = radians(arc.sweep_angle);
            theme::set_source(self.cr, *arc.color);
            self.draw_slice(radius, origin, sweep)?;
            self.draw_content(arc.icon, radius, origin + sweep / 2.0)?;
            self.cr.rotate(sweep);
        }

        self.cr.restore()
    }
}

pub fn draw(cr: &Context, menu: &Menu) -> Result<(), cairo::Error> {
    if let Some(circle) = menu.wheel.circle() {
        let border = menu.wheel.settings().border;
        theme::set_source(cr, menu.backdrop);
        cr.arc(
            circle.center.x,
            circle.center.y,
            circle.radius + border / 2.0,
            0.0,
            2.0 * PI,
        );
        cr.fill()?;
    }

    menu.wheel.paint(&mut CairoRenderer::new(cr), &menu.colors)
}
