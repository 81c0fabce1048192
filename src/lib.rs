//! Chat client theming
//!
//! Facade over the theming workspace:
//!
//! - [`theme_core`] - color keys, resolution, accent derivation and theme state
//! - [`bubble_render`] - bubble outlines, backgrounds and shadows
//!
//! # Example
//!
//! ```rust
//! use chat_theming::prelude::*;
//!
//! let ctx = ThemeContext::new(dark_theme());
//! let colors = BubbleColors::resolve(&ctx.snapshot(), Direction::Outgoing);
//! assert!(matches!(select_source(&colors, false, 50), BackgroundSource::Solid(_)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use bubble_render;
pub use theme_core;

/// Commonly used types from both crates
pub mod prelude {
    pub use bubble_render::{
        select_source, BackgroundSource, BubbleAdjacency, BubbleBackground, BubbleColors,
        BubbleConfig, BubbleLayer, BubblePainter, BubbleRequest, BubbleType, CrossFade,
        Direction, InlineWorker, MeshGradientProvider, NoMeshProvider, Paint, RasterWorker,
        Rect, RenderedBubble,
    };
    pub use theme_core::{
        all_themes, dark_theme, dim_theme, get_theme, light_theme, AccentProfile,
        AccentSelection, Color, ColorKey, ColorSource, ThemeContext, ThemeName, ThemeRecord,
        ThemeSettings,
    };
}
