//! Bubble design tokens
//!
//! Radii, insets and shadow parameters shared by the geometry and background
//! code, plus the [`BubbleConfig`] assembled from user settings.

use serde::{Deserialize, Serialize};
use theme_core::settings::ThemeSettings;

// =============================================================================
// Radius Tokens
// =============================================================================

/// Corner radius tokens
pub mod radius {
    /// Default bubble radius (17px)
    pub const DEFAULT_BUBBLE: f32 = 17.0;
    /// Largest radius for a corner next to another bubble (5px)
    pub const NEAR_MAX: f32 = 5.0;
    /// Radius for preview bubbles (6px)
    pub const PREVIEW: f32 = 6.0;
    /// Radius of the tail's outer arc (2px)
    pub const TAIL_TIP: f32 = 2.0;
}

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Bubble spacing tokens
pub mod spacing {
    /// Vertical inset on both edges (2px)
    pub const VERTICAL_INSET: f32 = 2.0;
    /// Tail lane reserved on the sender side of text bubbles (6px)
    pub const TAIL_WIDTH: f32 = 6.0;
    /// Height of the tail curve above the bottom edge (10px)
    pub const TAIL_HEIGHT: f32 = 10.0;
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Bubble shadow parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: u32,
}

impl ShadowStyle {
    /// Create a new shadow style
    pub fn new(offset_y: f32, blur: u32) -> Self {
        Self { offset_y, blur }
    }
}

/// Shadow presets
pub mod shadows {
    use super::ShadowStyle;

    /// No shadow
    pub fn none() -> ShadowStyle {
        ShadowStyle::new(0.0, 0)
    }

    /// Standard bubble shadow
    pub fn bubble() -> ShadowStyle {
        ShadowStyle::new(1.0, 3)
    }
}

/// Largest raster edge the shadow cache will allocate
pub const MAX_SHADOW_RASTER: u32 = 1024;

// =============================================================================
// Configuration
// =============================================================================

/// Rendering configuration for bubbles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleConfig {
    /// Configured bubble radius
    pub bubble_radius: f32,
    /// Mesh gradient pattern intensity, 0-100
    pub pattern_intensity: u8,
    /// Shadow parameters
    pub shadow: ShadowStyle,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            bubble_radius: radius::DEFAULT_BUBBLE,
            pattern_intensity: 50,
            shadow: shadows::bubble(),
        }
    }
}

impl BubbleConfig {
    /// Create a new bubble configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from stored settings
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        Self::new()
            .bubble_radius(settings.effective_bubble_radius() as f32)
            .pattern_intensity(settings.effective_pattern_intensity())
    }

    /// Set bubble radius
    pub fn bubble_radius(mut self, value: f32) -> Self {
        self.bubble_radius = value.clamp(0.0, radius::DEFAULT_BUBBLE);
        self
    }

    /// Set pattern intensity
    pub fn pattern_intensity(mut self, intensity: u8) -> Self {
        self.pattern_intensity = intensity.min(100);
        self
    }

    /// Set shadow parameters
    pub fn shadow(mut self, shadow: ShadowStyle) -> Self {
        self.shadow = shadow;
        self
    }

    /// Radius for corners next to another bubble
    pub fn near_radius(&self) -> f32 {
        self.bubble_radius.min(radius::NEAR_MAX)
    }
}
