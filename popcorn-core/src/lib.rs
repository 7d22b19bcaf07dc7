pub mod colour;
pub mod config;
pub mod error;
pub mod explorer;
pub mod geometry;
pub mod pick;
pub mod plot;
pub mod rational;
pub mod ratios;
pub mod transform;
pub mod viewport;

// Re-export primary types for convenience.
pub use colour::{Colour, ColourMode};
pub use config::{levels_from_slider, slider_from_levels, Settings, LEVELS_SLIDER_RANGE};
pub use error::CoreError;
pub use explorer::{Explorer, InputEvent, Key, Modifiers, PickInfo, PointerButton, Response};
pub use geometry::{Point, ViewRegion};
pub use pick::nearest;
pub use plot::{registry, PlotRegistry, PlotVariant, Projection};
pub use rational::{gcd, is_coprime, Ratio};
pub use ratios::{NumeratorLimit, Ratios};
pub use transform::Affine;
pub use viewport::{RotationMode, ViewportController, ZoomAxis};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
