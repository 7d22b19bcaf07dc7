pub mod error;
pub mod export;
pub mod raster;
pub mod renderer;
pub mod surface;

pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use raster::Raster;
pub use renderer::{render, DrawStats};
pub use surface::{RenderSurface, SurfaceGuard};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
