use std::f64::consts::{FRAC_PI_2, PI};

/// Projected half-width of the world at zoom 1 (x at lon = 180°, lat = 0°)
const HALF_WIDTH: f64 = 0.8707 * PI;

/// Natural Earth I forward projection of radians to unit-sphere plane coordinates.
/// Y grows northwards.
#[inline]
pub fn natural_earth(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let x = lambda
        * (0.8707 - 0.131979 * phi2
            + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
    let y = phi
        * (1.007226
            + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
    (x, y)
}

/// Inverse of [`natural_earth`], solving for latitude with Newton's method
pub fn natural_earth_inverse(x: f64, y: f64) -> (f64, f64) {
    let mut phi = y;
    for _ in 0..25 {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let delta = (phi
            * (1.007226
                + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
            - y)
            / (1.007226
                + phi2
                    * (0.015085 * 3.0
                        + phi4 * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2 - 0.005916 * 11.0 * phi4)));
        phi -= delta;
        if delta.abs() < 1e-9 {
            break;
        }
    }
    let phi = phi.clamp(-FRAC_PI_2, FRAC_PI_2);
    let phi2 = phi * phi;
    let lambda = x
        / (0.8707
            + phi2 * (-0.131979 + phi2 * (-0.013791 + phi2 * phi2 * phi2 * (0.003971 - 0.001529 * phi2))));
    (lambda, phi)
}

/// Wrap a longitude into [-180, 180)
#[inline]
fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Viewport representing the visible map area and zoom level
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Center longitude (-180 to 180); the projection is rotated about it
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (1 = whole world fits)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub const MIN_ZOOM: f64 = 0.5;
    pub const MAX_ZOOM: f64 = 50.0;

    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Create a world view (shows entire world)
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 0.0, 1.0, width, height)
    }

    /// Pixels per projected unit
    fn scale(&self) -> f64 {
        let (_, max_y) = natural_earth(0.0, FRAC_PI_2);
        let fit = (self.width as f64 / (2.0 * HALF_WIDTH)).min(self.height as f64 / (2.0 * max_y));
        (fit * self.zoom).max(f64::EPSILON)
    }

    fn center_y(&self) -> f64 {
        natural_earth(0.0, self.center_lat.to_radians()).1
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = self.scale();
        // Degrees per pixel, measured along the equator
        let deg_per_px = 180.0 / (HALF_WIDTH * scale);
        self.center_lon = wrap_lon(self.center_lon + dx as f64 * deg_per_px);
        self.center_lat = (self.center_lat - dy as f64 * deg_per_px).clamp(-85.0, 85.0);
    }

    /// Zoom in by a factor
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(Self::MAX_ZOOM);
    }

    /// Zoom out by a factor
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(Self::MIN_ZOOM);
    }

    /// Zoom in towards a specific pixel location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    /// Zoom out from a specific pixel location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Zoom by factor towards a specific pixel location
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let Some((lon, lat)) = self.unproject(px, py) else {
            // Off the globe: plain zoom about the center
            self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
            return;
        };

        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);

        // Bring the point under the cursor back to where it was
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let rel_lon = wrap_lon(lon - self.center_lon);
        let (x, y) = natural_earth(rel_lon.to_radians(), lat.clamp(-90.0, 90.0).to_radians());
        let scale = self.scale();

        let px = (self.width as f64 / 2.0 + x * scale).floor() as i32;
        let py = (self.height as f64 / 2.0 - (y - self.center_y()) * scale).floor() as i32;
        (px, py)
    }

    /// Unproject pixel coordinates back to (lon, lat).
    /// Returns `None` outside the projected world outline.
    pub fn unproject(&self, px: i32, py: i32) -> Option<(f64, f64)> {
        let scale = self.scale();
        let x = (px as f64 + 0.5 - self.width as f64 / 2.0) / scale;
        let y = self.center_y() - (py as f64 + 0.5 - self.height as f64 / 2.0) / scale;

        let (_, max_y) = natural_earth(0.0, FRAC_PI_2);
        if y.abs() > max_y {
            return None;
        }

        let (lambda, phi) = natural_earth_inverse(x, y);
        if lambda.abs() > PI {
            return None;
        }

        Some((wrap_lon(lambda.to_degrees() + self.center_lon), phi.to_degrees()))
    }

    /// Pixel polygon of the world's edge (the rotated antimeridian on both sides)
    pub fn outline(&self) -> Vec<(i32, i32)> {
        let steps = 90;
        let edge = 179.999;
        let mut ring = Vec::with_capacity(steps * 2 + 2);
        // East edge north to south, then west edge south to north
        for i in 0..=steps {
            let lat = 90.0 - 180.0 * i as f64 / steps as f64;
            ring.push(self.project(self.center_lon + edge, lat));
        }
        for i in 0..=steps {
            let lat = -90.0 + 180.0 * i as f64 / steps as f64;
            ring.push(self.project(self.center_lon - edge, lat));
        }
        ring
    }

    /// Whether an edge between two longitudes crosses the seam opposite the center.
    /// Such an edge would be drawn across the whole map.
    pub fn crosses_seam(&self, lon0: f64, lon1: f64) -> bool {
        (wrap_lon(lon1 - self.center_lon) - wrap_lon(lon0 - self.center_lon)).abs() > 180.0
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}
