//! Mapping between deck meters and screen pixels.
//!
//! Purely presentational. The engine works in meters only; a UI converts
//! pointer positions with [`ViewScale::to_surface`] before handing them to a
//! [`LayoutSession`](crate::session::LayoutSession).

use crate::types::Vec2;

/// Zoom state of a deck view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewScale {
    zoom: f64,
}

impl ViewScale {
    pub const MIN_ZOOM: f64 = 0.3;
    pub const MAX_ZOOM: f64 = 2.0;
    /// Pixels per meter at 100 % zoom.
    pub const BASE_PIXELS_PER_METER: f64 = 60.0;
    /// Horizontal pixel budget used when no viewport width is known.
    pub const DEFAULT_VIEWPORT_PX: f64 = 900.0;
    const ZOOM_STEP: f64 = 0.1;

    /// Creates a view with the zoom clamped to the allowed range.
    pub fn new(zoom: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
        }
    }

    /// Zoom that makes a deck of the given length fill the viewport width.
    pub fn fit(surface_length: f64, viewport_px: f64) -> Self {
        if surface_length <= 0.0 || viewport_px <= 0.0 {
            return Self::default();
        }
        Self::new(viewport_px / (surface_length * Self::BASE_PIXELS_PER_METER))
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom as a rounded percentage, e.g. 75.
    pub fn percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + Self::ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - Self::ZOOM_STEP);
    }

    pub fn pixels_per_meter(&self) -> f64 {
        Self::BASE_PIXELS_PER_METER * self.zoom
    }

    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter()
    }

    /// Converts a pointer position relative to the deck's drawn origin into surface meters.
    pub fn to_surface(&self, pixels: Vec2) -> Vec2 {
        pixels * (1.0 / self.pixels_per_meter())
    }
}

impl Default for ViewScale {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(ViewScale::MIN_ZOOM, ViewScale::MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_uses_viewport_budget() {
        let view = ViewScale::fit(12.0, 720.0);
        assert!((view.zoom() - 1.0).abs() < 1e-9);

        let view = ViewScale::fit(15.0, ViewScale::DEFAULT_VIEWPORT_PX);
        assert_eq!(view.percent(), 100);
    }

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(ViewScale::fit(100.0, 300.0).zoom(), ViewScale::MIN_ZOOM);
        assert_eq!(ViewScale::fit(1.0, 5000.0).zoom(), ViewScale::MAX_ZOOM);

        let mut view = ViewScale::new(1.95);
        view.zoom_in();
        assert_eq!(view.zoom(), ViewScale::MAX_ZOOM);
        assert_eq!(ViewScale::new(f64::NAN).zoom(), 1.0);

        let mut view = ViewScale::new(0.35);
        view.zoom_out();
        assert_eq!(view.zoom(), ViewScale::MIN_ZOOM);
    }

    #[test]
    fn pixel_round_trip() {
        let view = ViewScale::new(0.5);
        assert!((view.to_pixels(2.0) - 60.0).abs() < 1e-9);
        let meters = view.to_surface(Vec2::new(60.0, 30.0));
        assert!((meters.x - 2.0).abs() < 1e-9);
        assert!((meters.y - 1.0).abs() < 1e-9);
    }
}
