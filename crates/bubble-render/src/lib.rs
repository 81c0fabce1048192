//! Chat bubble rendering inputs
//!
//! This crate computes everything a renderer needs to draw a message
//! bubble: the outline path, the background paint (solid, linear gradient
//! or animated mesh gradient), the drop shadow raster and the layer order,
//! including cross-fades between two snapshots. It never touches a canvas.
//!
//! # Modules
//!
//! - [`tokens`] - Radii, insets, shadow presets and [`BubbleConfig`]
//! - [`geometry`] - Outline paths and the shape cache
//! - [`source`] - Paint source selection and the mesh provider seam
//! - [`shadow`] - Shadow rasters, raster workers and the shadow cache
//! - [`background`] - Background snapshots, painter and cross-fades
//!
//! # Example
//!
//! ```rust
//! use bubble_render::{
//!     BubbleAdjacency, BubbleConfig, BubblePainter, BubbleRequest, BubbleType, Direction,
//!     InlineWorker, NoMeshProvider, Rect,
//! };
//! use theme_core::{light_theme, ThemeContext};
//!
//! let ctx = ThemeContext::new(light_theme());
//! let mut painter = BubblePainter::new(BubbleConfig::default(), NoMeshProvider, InlineWorker);
//!
//! let request = BubbleRequest::new(
//!     Rect::new(0.0, 0.0, 240.0, 48.0),
//!     Direction::Outgoing,
//!     BubbleAdjacency::new(BubbleType::Text),
//! );
//! let bubble = painter.paint(&ctx.snapshot(), &request, false);
//! assert!(!bubble.layers.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod background;
pub mod geometry;
pub mod shadow;
pub mod source;
pub mod tokens;

// Re-export commonly used types
pub use background::{BubbleBackground, BubbleLayer, BubblePainter, CrossFade, Paint, RenderedBubble};
pub use geometry::{
    BubbleAdjacency, BubbleGeometry, BubblePath, BubbleRequest, BubbleShapeCache, BubbleType,
    CornerRadii, Direction, PathCommand, Point, Rect, RedrawMode, Viewport,
};
pub use shadow::{
    AdjacencyCorner, InlineWorker, RasterCallback, RasterWorker, ShadowCache, ShadowError,
    ShadowRaster, ShadowSpec,
};
pub use source::{
    select_source, BackgroundSource, BubbleColors, MeshGradientProvider, MeshGradientRequest,
    MeshShader, NoMeshProvider,
};
pub use tokens::{BubbleConfig, ShadowStyle};
