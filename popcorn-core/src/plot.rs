use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::CoreError;
use crate::geometry::{Point, ViewRegion};
use crate::ratios::{NumeratorLimit, Ratios};

/// A projection of coprime pairs `(i, j)` into model space.
///
/// `i` is the numerator and `j` the denominator. Implementations must make
/// [`unproject`](Self::unproject) the inverse of [`project`](Self::project)
/// over the pairs yielded by [`ratios`](Self::ratios).
///
/// Designed for **static dispatch**: the renderer and picker are generic
/// over `P: Projection`.
pub trait Projection {
    fn name(&self) -> &'static str;

    /// Model-space region shown after a view reset.
    fn initial_region(&self, levels: u32) -> ViewRegion;

    fn project(&self, i: i64, j: i64) -> Point;

    /// Dot radius in model units. May be non-finite for the origin marker,
    /// in which case the marker is not drawn.
    fn dot_radius(&self, i: i64, j: i64) -> f64;

    /// Map a model-space point back to a fractional `(numerator, denominator)`.
    fn unproject(&self, p: Point) -> (f64, f64);

    /// The pairs plotted at `levels`. Defaults to the triangular enumeration
    /// `0 <= i <= j`, `1 <= j <= levels`.
    fn ratios(&self, levels: u32) -> Ratios {
        Ratios::new(0, 1, NumeratorLimit::Denominator, i64::from(levels))
    }
}

/// The built-in plot variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotVariant {
    /// `(i/j, 1/j)`: Farey fractions stacked by denominator.
    Normal,
    /// `(i/j, j)`: denominators grow upward.
    Invert,
    /// `(2i − j, j)`: each row stretched to its own width.
    Stretch,
    /// Row `j` laid on a half circle of radius `j`.
    Semicircle,
    /// `(i, j)` with numerators in `[−L, L]`.
    Rationals,
}

impl PlotVariant {
    /// Registration order, which is also display order.
    pub const ALL: [PlotVariant; 5] = [
        Self::Normal,
        Self::Invert,
        Self::Stretch,
        Self::Semicircle,
        Self::Rationals,
    ];
}

impl Projection for PlotVariant {
    fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Invert => "Invert",
            Self::Stretch => "Stretch",
            Self::Semicircle => "Semicircle",
            Self::Rationals => "Rationals",
        }
    }

    fn initial_region(&self, levels: u32) -> ViewRegion {
        let l = f64::from(levels);
        match self {
            Self::Normal => ViewRegion::new(0.0, 0.0, 1.0, 1.0),
            Self::Invert => ViewRegion::new(0.0, 0.0, 1.0, l),
            Self::Stretch | Self::Semicircle | Self::Rationals => {
                ViewRegion::new(-l, 0.0, l, l)
            }
        }
    }

    fn project(&self, i: i64, j: i64) -> Point {
        let (x, y) = (i as f64, j as f64);
        match self {
            Self::Normal => Point::new(x / y, 1.0 / y),
            Self::Invert => Point::new(x / y, y),
            Self::Stretch => Point::new((2.0 * x / y - 1.0) * y, y),
            Self::Semicircle => {
                let theta = PI * x / y;
                Point::new(-y * theta.cos(), y * theta.sin())
            }
            Self::Rationals => Point::new(x, y),
        }
    }

    fn dot_radius(&self, _i: i64, j: i64) -> f64 {
        match self {
            Self::Normal => 0.03 / j as f64,
            Self::Invert => 0.01 / (j as f64).sqrt(),
            Self::Stretch | Self::Semicircle => 0.5,
            Self::Rationals => 0.3,
        }
    }

    fn unproject(&self, p: Point) -> (f64, f64) {
        match self {
            Self::Normal => (p.x / p.y, 1.0 / p.y),
            Self::Invert => (p.x * p.y, p.y),
            Self::Stretch => ((p.x / p.y + 1.0) / 2.0 * p.y, p.y),
            Self::Semicircle => {
                let r = p.norm();
                let theta = (-p.x / r).clamp(-1.0, 1.0).acos();
                (theta * r / PI, r)
            }
            Self::Rationals => (p.x, p.y),
        }
    }

    fn ratios(&self, levels: u32) -> Ratios {
        let l = i64::from(levels);
        match self {
            Self::Rationals => Ratios::new(-l, 1, NumeratorLimit::Constant(l), l),
            _ => Ratios::new(0, 1, NumeratorLimit::Denominator, l),
        }
    }
}

impl fmt::Display for PlotVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotVariant {
    type Err = CoreError;

    /// Case-insensitive lookup in the process-wide [`registry`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry()
            .lookup(s)
            .ok_or_else(|| CoreError::UnknownPlot(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered, name-keyed set of plot variants.
///
/// Names are unique ignoring ASCII case. There is no removal or replacement.
#[derive(Debug, Clone, Default)]
pub struct PlotRegistry {
    variants: Vec<PlotVariant>,
}

impl PlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in variant in [`PlotVariant::ALL`] order.
    pub fn builtin() -> Self {
        let registry = Self {
            variants: PlotVariant::ALL.to_vec(),
        };
        for name in registry.names() {
            debug!(plot = name, "Available plot");
        }
        registry
    }

    pub fn register(&mut self, variant: PlotVariant) -> crate::Result<()> {
        if self.lookup(variant.name()).is_some() {
            return Err(CoreError::DuplicatePlot(variant.name().to_string()));
        }
        self.variants.push(variant);
        Ok(())
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(&self, name: &str) -> Option<PlotVariant> {
        self.variants
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = PlotVariant> + '_ {
        self.variants.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// The process-wide registry, populated with the built-ins on first use.
pub fn registry() -> &'static PlotRegistry {
    static REGISTRY: OnceLock<PlotRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PlotRegistry::builtin)
}
