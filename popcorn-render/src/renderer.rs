use std::time::{Duration, Instant};

use tracing::debug;

use popcorn_core::{Affine, Colour, ColourMode, Projection, ViewportController};

use crate::surface::{RenderSurface, SurfaceGuard};

/// Share of the origin marker's radius covered by its white centre.
const ORIGIN_INNER_RATIO: f64 = 0.6;

/// Summary of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Number of lattice dots drawn (the origin marker is not counted).
    pub dots: usize,
    pub origin_marker: bool,
    /// `true` when the effective transform was singular and only the
    /// background was painted.
    pub skipped: bool,
    pub elapsed: Duration,
}

/// Draw one frame of `plot` at `levels` onto `surface`.
///
/// Clears to white in device space, then draws the origin marker and every
/// pair from [`Projection::ratios`] under the viewport's effective transform.
/// A singular transform (zero-sized canvas mid-resize) skips the frame
/// instead of failing. The surface transform is restored before returning.
pub fn render<S, P>(
    surface: &mut S,
    viewport: &ViewportController,
    plot: &P,
    levels: u32,
    colour: ColourMode,
) -> DrawStats
where
    S: RenderSurface + ?Sized,
    P: Projection,
{
    let start = Instant::now();
    debug!(levels, plot = plot.name(), %colour, "Drawing");

    {
        let mut s = SurfaceGuard::new(&mut *surface);
        let (w, h) = (f64::from(s.width()), f64::from(s.height()));
        s.set_transform(Affine::IDENTITY);
        s.set_fill(Colour::White);
        s.fill_rect(0.0, 0.0, w, h);
    }

    let effective = match viewport.effective_transform() {
        Ok(m) => m,
        Err(e) => {
            debug!("Skipping frame: {e}");
            return DrawStats {
                skipped: true,
                elapsed: start.elapsed(),
                ..DrawStats::default()
            };
        }
    };

    let mut stats = DrawStats::default();
    {
        let mut s = SurfaceGuard::new(&mut *surface);
        s.set_transform(effective);

        let r0 = plot.dot_radius(0, 0);
        debug!(r0, "Origin dot radius");
        if r0.is_finite() {
            let (rx, ry) = viewport.dot_radii(r0);
            s.set_fill(Colour::Black);
            s.fill_ellipse(0.0, 0.0, rx, ry);
            s.set_fill(Colour::White);
            s.fill_ellipse(0.0, 0.0, rx * ORIGIN_INNER_RATIO, ry * ORIGIN_INNER_RATIO);
            stats.origin_marker = true;
        }

        let paint = colour.painter();
        let uniform = colour == ColourMode::Black;
        if uniform {
            s.set_fill(Colour::Black);
        }
        for ratio in plot.ratios(levels) {
            let (i, j) = (ratio.numerator, ratio.denominator);
            if !uniform {
                s.set_fill(paint(i, j));
            }
            let p = plot.project(i, j);
            let (rx, ry) = viewport.dot_radii(plot.dot_radius(i, j));
            s.fill_ellipse(p.x, p.y, rx, ry);
            stats.dots += 1;
        }
    }

    stats.elapsed = start.elapsed();
    debug!(
        elapsed_ms = stats.elapsed.as_millis(),
        dots = stats.dots,
        "Render complete"
    );
    stats
}
