//! Software implementation of [`RenderSurface`] over an RGBA8 buffer.

use popcorn_core::{Affine, Colour, Point};

use crate::error::RenderError;
use crate::surface::RenderSurface;

const WHITE: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Affine,
    /// Cached inverse of `transform`; `None` while it is singular.
    inverse: Option<Affine>,
    fill: [u8; 4],
}

impl State {
    fn new(transform: Affine, fill: [u8; 4]) -> Self {
        Self {
            transform,
            inverse: transform.invert().ok(),
            fill,
        }
    }
}

/// An RGBA pixel buffer with a canvas-style transform and state stack.
///
/// Shapes are rasterised by mapping pixel centres back into local space, so
/// ellipses stay correct under rotation and non-uniform scale. Shapes
/// smaller than a pixel are blended into the pixel under their centre with
/// alpha equal to their covered area.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pixels: Vec<u8>,
    state: State,
    stack: Vec<State>,
}

impl Raster {
    /// Create a buffer filled with opaque white.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: WHITE.repeat(width as usize * height as usize),
            state: State::new(Affine::IDENTITY, Colour::Black.to_rgba()),
            stack: Vec::new(),
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of one pixel. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, alpha: f64) {
        let fill = self.state.fill;
        let i = self.index(x, y);
        let px = &mut self.pixels[i..i + 4];
        if alpha >= 1.0 {
            px.copy_from_slice(&fill);
            return;
        }
        let inv = 1.0 - alpha;
        for c in 0..3 {
            px[c] = (f64::from(px[c]) * inv + f64::from(fill[c]) * alpha).round() as u8;
        }
        px[3] = 255;
    }

    /// Device-space bounding box of a local rectangle, clipped to the
    /// buffer. Returns `(x0, y0, x1, y1)` with exclusive upper bounds.
    fn device_bounds(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<(u32, u32, u32, u32)> {
        let m = self.state.transform;
        let corners = [
            m.apply(Point::new(x0, y0)),
            m.apply(Point::new(x1, y0)),
            m.apply(Point::new(x0, y1)),
            m.apply(Point::new(x1, y1)),
        ];
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return None;
        }
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        if max_x < 0.0 || max_y < 0.0 || min_x >= w || min_y >= h {
            return None;
        }
        Some((
            min_x.floor().max(0.0) as u32,
            min_y.floor().max(0.0) as u32,
            max_x.ceil().min(w) as u32,
            max_y.ceil().min(h) as u32,
        ))
    }

    /// Visit each in-bounds pixel whose centre, mapped to local space,
    /// satisfies `inside`. Returns how many pixels were painted.
    fn scan<F>(&mut self, bounds: (u32, u32, u32, u32), inside: F) -> usize
    where
        F: Fn(Point) -> bool,
    {
        let Some(inv) = self.state.inverse else {
            return 0;
        };
        let (x0, y0, x1, y1) = bounds;
        let mut painted = 0;
        for py in y0..y1 {
            for px in x0..x1 {
                let local = inv.apply(Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5));
                if inside(local) {
                    self.blend(px, py, 1.0);
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Blend a sub-pixel shape centred at local `(cx, cy)` with the given
    /// device-space area.
    fn speck(&mut self, cx: f64, cy: f64, device_area: f64) {
        let c = self.state.transform.apply(Point::new(cx, cy));
        if c.x < 0.0 || c.y < 0.0 || c.x >= f64::from(self.width) || c.y >= f64::from(self.height) {
            return;
        }
        self.blend(c.x as u32, c.y as u32, device_area.min(1.0));
    }
}

impl RenderSurface for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate and clear to white. Zero sizes are clamped to one pixel.
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixels = WHITE.repeat(self.width as usize * self.height as usize);
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn set_transform(&mut self, m: Affine) {
        self.state = State::new(m, self.state.fill);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_fill(&mut self, colour: Colour) {
        self.state.fill = colour.to_rgba();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1) = (x.min(x + width), x.max(x + width));
        let (y0, y1) = (y.min(y + height), y.max(y + height));
        let Some(bounds) = self.device_bounds(x0, y0, x1, y1) else {
            return;
        };
        self.scan(bounds, |p| p.x >= x0 && p.x < x1 && p.y >= y0 && p.y < y1);
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        if !(rx > 0.0 && ry > 0.0 && rx.is_finite() && ry.is_finite()) {
            return;
        }
        let Some(bounds) = self.device_bounds(cx - rx, cy - ry, cx + rx, cy + ry) else {
            return;
        };
        let painted = self.scan(bounds, |p| {
            let dx = (p.x - cx) / rx;
            let dy = (p.y - cy) / ry;
            dx * dx + dy * dy <= 1.0
        });
        if painted == 0 {
            let area = std::f64::consts::PI * rx * ry * self.state.transform.determinant().abs();
            if area < 1.0 {
                self.speck(cx, cy, area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn new_raster_is_white() {
        let r = Raster::new(3, 2).unwrap();
        assert_eq!(r.pixels().len(), 3 * 2 * 4);
        assert!(r.pixels().chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Raster::new(0, 5),
            Err(RenderError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn fill_rect_in_device_space() {
        let mut r = Raster::new(8, 8).unwrap();
        r.set_fill(Colour::Black);
        r.fill_rect(2.0, 1.0, 3.0, 2.0);
        assert_eq!(r.pixel(2, 1), BLACK);
        assert_eq!(r.pixel(4, 2), BLACK);
        assert_eq!(r.pixel(5, 2), WHITE);
        assert_eq!(r.pixel(2, 3), WHITE);
    }

    #[test]
    fn ellipse_under_transform() {
        let mut r = Raster::new(20, 20).unwrap();
        r.set_transform(Affine::new(10.0, 0.0, 0.0, -10.0, 10.0, 10.0));
        r.set_fill(Colour::Black);
        r.fill_ellipse(0.0, 0.0, 0.5, 0.5);
        // Centre pixel covered, corner pixel untouched.
        assert_eq!(r.pixel(10, 10), BLACK);
        assert_eq!(r.pixel(12, 12), BLACK);
        assert_eq!(r.pixel(0, 0), WHITE);
        assert_eq!(r.pixel(16, 10), WHITE);
    }

    #[test]
    fn rotated_ellipse_follows_the_transform() {
        let mut r = Raster::new(40, 40).unwrap();
        r.set_transform(Affine::translation(20.0, 20.0).rotate(std::f64::consts::FRAC_PI_2));
        r.set_fill(Colour::Black);
        // Wide in local x; after a quarter turn it is tall on screen.
        r.fill_ellipse(0.0, 0.0, 15.0, 3.0);
        assert_eq!(r.pixel(20, 5), BLACK);
        assert_eq!(r.pixel(20, 34), BLACK);
        assert_eq!(r.pixel(5, 20), WHITE);
        assert_eq!(r.pixel(34, 20), WHITE);
    }

    #[test]
    fn sub_pixel_ellipse_is_blended() {
        let mut r = Raster::new(4, 4).unwrap();
        r.set_fill(Colour::Black);
        r.fill_ellipse(1.2, 1.2, 0.2, 0.2);
        let px = r.pixel(1, 1);
        assert!(px[0] < 255 && px[0] > 0, "{px:?}");
        assert_eq!(r.pixel(2, 2), WHITE);
    }

    #[test]
    fn degenerate_ellipses_are_skipped() {
        let mut r = Raster::new(4, 4).unwrap();
        r.set_fill(Colour::Black);
        r.fill_ellipse(2.0, 2.0, f64::INFINITY, 1.0);
        r.fill_ellipse(2.0, 2.0, 0.0, 1.0);
        r.fill_ellipse(2.0, 2.0, f64::NAN, 1.0);
        assert!(r.pixels().chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn singular_transform_draws_nothing() {
        let mut r = Raster::new(4, 4).unwrap();
        r.set_transform(Affine::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        r.set_fill(Colour::Black);
        r.fill_rect(0.0, 0.0, 4.0, 4.0);
        r.fill_ellipse(1.0, 1.0, 1.0, 1.0);
        assert!(r.pixels().chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn save_restore_covers_fill() {
        let mut r = Raster::new(2, 1).unwrap();
        r.set_fill(Colour::Black);
        r.save();
        r.set_fill(Colour::hue(120.0));
        r.restore();
        r.fill_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(r.pixel(0, 0), BLACK);
        // Unbalanced restore is a no-op.
        r.restore();
        assert_eq!(r.depth(), 0);
    }

    #[test]
    fn resize_keeps_transform_and_clears() {
        let mut r = Raster::new(2, 2).unwrap();
        let m = Affine::scaling(2.0, 2.0);
        r.set_transform(m);
        r.set_fill(Colour::Black);
        r.fill_rect(0.0, 0.0, 1.0, 1.0);
        r.set_size(5, 3);
        assert_eq!((r.width(), r.height()), (5, 3));
        assert_eq!(r.transform(), m);
        assert!(r.pixels().chunks_exact(4).all(|px| px == WHITE));
    }
}
