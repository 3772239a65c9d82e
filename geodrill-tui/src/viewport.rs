//! Zoom and pan over a region's lon/lat bounding box.

use geodrill_core::data::Bounds;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 64.0;
const ZOOM_STEP: f64 = 1.5;
/// Fraction of the visible span moved per pan step.
const PAN_STEP: f64 = 0.2;
/// Margin around the data so edge outlines are not clipped.
const MARGIN: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    home: Bounds,
    center: (f64, f64),
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::fit(None)
    }
}

impl Viewport {
    /// Fit the whole data set; falls back to the full lon/lat range.
    pub fn fit(bounds: Option<Bounds>) -> Self {
        let b = bounds.unwrap_or(Bounds {
            min_x: -180.0,
            min_y: -90.0,
            max_x: 180.0,
            max_y: 90.0,
        });
        // Pad degenerate boxes (single point or line) to something drawable.
        let pad_x = (b.width() * MARGIN).max(if b.width() > 0.0 { 0.0 } else { 0.5 });
        let pad_y = (b.height() * MARGIN).max(if b.height() > 0.0 { 0.0 } else { 0.5 });
        let home = Bounds {
            min_x: b.min_x - pad_x,
            min_y: b.min_y - pad_y,
            max_x: b.max_x + pad_x,
            max_y: b.max_y + pad_y,
        };
        Self {
            home,
            center: home.center(),
            zoom: MIN_ZOOM,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
        self.clamp_center();
    }

    /// Pan by whole steps; positive `dx` moves east, positive `dy` north.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let (w, h) = self.span();
        self.center.0 += dx * w * PAN_STEP;
        self.center.1 += dy * h * PAN_STEP;
        self.clamp_center();
    }

    pub fn reset(&mut self) {
        self.center = self.home.center();
        self.zoom = MIN_ZOOM;
    }

    fn span(&self) -> (f64, f64) {
        (self.home.width() / self.zoom, self.home.height() / self.zoom)
    }

    /// Keep the center inside the home box.
    fn clamp_center(&mut self) {
        self.center.0 = self.center.0.clamp(self.home.min_x, self.home.max_x);
        self.center.1 = self.center.1.clamp(self.home.min_y, self.home.max_y);
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let (w, _) = self.span();
        [self.center.0 - w / 2.0, self.center.0 + w / 2.0]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let (_, h) = self.span();
        [self.center.1 - h / 2.0, self.center.1 + h / 2.0]
    }
}
