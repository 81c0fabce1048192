//! Color resolution and accent derivation
//!
//! This crate resolves symbolic color keys to concrete colors across the
//! layered override system (theme defaults, accent overlay, fallback keys,
//! transient animation overlay) and derives a full accent palette from a
//! single chosen hue.
//!
//! # Modules
//!
//! - [`color`] - ARGB colors and HSV conversion
//! - [`keys`] - The color key registry
//! - [`entry`] - `key=value` entry codec
//! - [`overlay`] - Resolved and animation overlays
//! - [`table`] - Default table, fallback graph and resolution
//! - [`accent`] - The HSV accent transform
//! - [`profile`] - Accent profile derivation
//! - [`theme`] - Built-in theme records
//! - [`settings`] - Persisted user settings
//! - [`context`] - Shared, swappable theme state
//!
//! # Example
//!
//! ```rust
//! use theme_core::{ColorKey, ThemeContext, ThemeName, ThemeSettings};
//!
//! let settings = ThemeSettings {
//!     theme: ThemeName::Dark,
//!     accent_id: Some(1),
//!     ..ThemeSettings::default()
//! };
//! let ctx = ThemeContext::from_settings(&settings);
//! let fill = ctx.resolve(ColorKey::ChatOutBubble);
//! assert_eq!(fill.alpha(), 0xFF);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accent;
pub mod color;
pub mod context;
pub mod entry;
pub mod keys;
pub mod overlay;
pub mod profile;
pub mod settings;
pub mod table;
pub mod theme;

// Re-export commonly used types
pub use accent::{perceived_brightness, AccentTransform};
pub use color::{Color, ColorParseError, Hsv};
pub use context::{ColorSource, PaletteSnapshot, ThemeContext, ThemeSnapshot};
pub use entry::{ColorEntry, EntryParseError};
pub use keys::{ColorKey, KeyGroup, KeyParseError};
pub use overlay::{AnimationOverlay, ResolvedOverlay};
pub use profile::{
    AccentProfile, AccentSelection, BackgroundOverride, GradientStops, OutgoingBubbleColors,
};
pub use settings::ThemeSettings;
pub use table::{ColorTable, DefaultTable, FallbackGraph, RegistryError, Resolved};
pub use theme::{all_themes, dark_theme, dim_theme, get_theme, light_theme, ThemeName, ThemeRecord};
