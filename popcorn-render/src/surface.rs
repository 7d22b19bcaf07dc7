use std::ops::{Deref, DerefMut};

use popcorn_core::{Affine, Colour};

/// The drawing capability the renderer needs, shaped after a 2D canvas
/// context.
///
/// Transform helpers post-multiply the current transform, so they act in the
/// current local coordinate space. Shape coordinates are in local space.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize in device pixels. The current transform is kept.
    fn set_size(&mut self, width: u32, height: u32);

    fn transform(&self) -> Affine;
    fn set_transform(&mut self, m: Affine);

    /// Push the current transform and fill onto the state stack.
    fn save(&mut self);
    /// Pop the state stack. A restore without a matching save is ignored.
    fn restore(&mut self);

    fn set_fill(&mut self, colour: Colour);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Fill an axis-aligned (in local space) ellipse.
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64);

    fn translate(&mut self, dx: f64, dy: f64) {
        let m = self.transform().translate(dx, dy);
        self.set_transform(m);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let m = self.transform().scale(sx, sy);
        self.set_transform(m);
    }

    fn rotate(&mut self, theta: f64) {
        let m = self.transform().rotate(theta);
        self.set_transform(m);
    }
}

/// Saves the surface state on creation and restores it on drop, so an early
/// return or panic inside a drawing scope cannot leak a transform change.
pub struct SurfaceGuard<'a, S: RenderSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: RenderSurface + ?Sized> SurfaceGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: RenderSurface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
