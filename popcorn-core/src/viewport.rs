use tracing::{debug, info};

use crate::geometry::{Point, ViewRegion};
use crate::plot::Projection;
use crate::transform::Affine;

/// Wheel sensitivity: each 100 units of wheel delta zooms by 10 %.
const ZOOM_BASE: f64 = 1.1;

/// How the accumulated rotation angle enters the effective transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationMode {
    /// Angle ignored.
    #[default]
    None,
    /// Rotate in model space about the model point under the canvas centre.
    AroundCenter,
    /// Rotate in screen space about the canvas pixel centre, wrapping the
    /// base transform.
    Baked,
}

impl RotationMode {
    /// `None → AroundCenter → Baked → None`.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::AroundCenter,
            Self::AroundCenter => Self::Baked,
            Self::Baked => Self::None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::None => 0,
            Self::AroundCenter => 1,
            Self::Baked => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Off",
            Self::AroundCenter => "Model space",
            Self::Baked => "Screen space",
        }
    }
}

/// Which axes a zoom scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomAxis {
    #[default]
    Both,
    X,
    Y,
}

/// Owns the model→screen mapping for one canvas.
///
/// The base transform is changed by pan, zoom and view resets. The rotation
/// is kept separately and composed on demand by
/// [`effective_transform`](Self::effective_transform); the base is never
/// modified by that computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    width: u32,
    height: u32,
    base: Affine,
    angle: f64,
    mode: RotationMode,
}

impl ViewportController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            base: Affine::IDENTITY,
            angle: 0.0,
            mode: RotationMode::None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the canvas size in device pixels. The transform coefficients
    /// are kept, so the model point at the top-left corner stays put.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn base(&self) -> Affine {
        self.base
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.mode
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.mode = mode;
    }

    /// Advance to the next rotation mode, wrapping after [`RotationMode::Baked`].
    pub fn cycle_rotation_mode(&mut self) -> RotationMode {
        self.mode = self.mode.next();
        info!(mode = self.mode.index(), "Rotation mode changed");
        self.mode
    }

    /// Accumulate `delta` radians. Ignored (returns `false`) while rotation
    /// is off.
    pub fn rotate_by(&mut self, delta: f64) -> bool {
        if self.mode == RotationMode::None {
            return false;
        }
        self.angle += delta;
        true
    }

    fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Make `region` exactly fill the canvas, with model y pointing up.
    pub fn set_view(&mut self, region: ViewRegion) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let a = w / (region.max_x - region.min_x);
        let d = h / (region.min_y - region.max_y);
        let e = -a * region.min_x;
        let f = h - d * region.min_y;
        debug!(?region, a, d, e, f, "Setting view");
        self.base = Affine::new(a, 0.0, 0.0, d, e, f);
    }

    /// The model-space region under the canvas, from the base transform.
    pub fn view(&self) -> crate::Result<ViewRegion> {
        let inv = self.base.invert()?;
        let top_left = inv.apply(Point::ORIGIN);
        let bottom_right = inv.apply(Point::new(f64::from(self.width), f64::from(self.height)));
        Ok(ViewRegion::new(
            top_left.x,
            bottom_right.y,
            bottom_right.x,
            top_left.y,
        ))
    }

    /// The base transform with the pending rotation applied.
    ///
    /// Fails with [`SingularMatrix`](crate::CoreError::SingularMatrix) when
    /// the result cannot be inverted, e.g. after a view was set on a canvas
    /// with zero width or height.
    pub fn effective_transform(&self) -> crate::Result<Affine> {
        let m = match self.mode {
            RotationMode::None => self.base,
            RotationMode::AroundCenter => {
                let p = self.base.apply_inverse(self.center())?;
                self.base
                    .translate(p.x, p.y)
                    .rotate(-self.angle)
                    .translate(-p.x, -p.y)
            }
            RotationMode::Baked => {
                let c = self.center();
                Affine::translation(c.x, c.y)
                    .rotate(self.angle)
                    .translate(-c.x, -c.y)
                    .compose(&self.base)
            }
        };
        m.ensure_invertible()?;
        Ok(m)
    }

    /// Map a screen point to model space through the effective transform.
    pub fn to_model(&self, screen: Point) -> crate::Result<Point> {
        self.effective_transform()?.apply_inverse(screen)
    }

    /// `|a / d|` of the base transform.
    ///
    /// Only meaningful while the base has no rotation or skew, which holds
    /// because rotation is never folded into it.
    pub fn aspect(&self) -> f64 {
        (self.base.a / self.base.d).abs()
    }

    /// Horizontal and vertical dot radii in model units for a dot of
    /// radius `r`, so dots look round on screen. Model-space rotation skips
    /// the correction.
    pub fn dot_radii(&self, r: f64) -> (f64, f64) {
        if self.mode == RotationMode::AroundCenter {
            (r, r)
        } else {
            (r, r * self.aspect())
        }
    }

    /// Reset the angle and show `plot`'s initial region for `levels`.
    pub fn reset_view<P: Projection>(&mut self, plot: &P, levels: u32) {
        info!(levels, plot = plot.name(), "Resetting view");
        self.angle = 0.0;
        self.set_view(plot.initial_region(levels));
    }

    /// Shift the view by a screen-space drag of `(dx, dy)` pixels.
    ///
    /// The model delta under the effective transform is added to the base.
    /// With screen-space rotation the delta is compensated by
    /// [`aspect`](Self::aspect).
    pub fn pan(&mut self, dx: f64, dy: f64) -> crate::Result<()> {
        let inv = self.effective_transform()?.invert()?;
        let v = inv.apply_vector(Point::new(dx, dy));
        let aspect = if self.mode == RotationMode::Baked {
            self.aspect()
        } else {
            1.0
        };
        self.base = self.base.translate(v.x / aspect, v.y * aspect);
        Ok(())
    }

    /// Scale by `factor` about the model point under `screen`.
    pub fn zoom(&mut self, screen: Point, factor: f64, axis: ZoomAxis) -> crate::Result<()> {
        let p = self.to_model(screen)?;
        let (sx, sy) = match axis {
            ZoomAxis::Both => (factor, factor),
            ZoomAxis::X => (factor, 1.0),
            ZoomAxis::Y => (1.0, factor),
        };
        self.base = self
            .base
            .translate(p.x, p.y)
            .scale(sx, sy)
            .translate(-p.x, -p.y);
        Ok(())
    }

    /// `1.1^(−delta / 100)`: positive (downward) wheel deltas zoom out.
    pub fn zoom_factor(wheel_delta: f64) -> f64 {
        ZOOM_BASE.powf(-wheel_delta / 100.0)
    }
}
