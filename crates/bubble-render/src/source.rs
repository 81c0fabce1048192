//! Background paint source selection
//!
//! Picks solid, linear gradient or mesh gradient paint for a bubble from
//! its resolved colors. Only outgoing bubbles carry gradient stops.

use crate::geometry::Direction;
use serde::{Deserialize, Serialize};
use theme_core::context::ColorSource;
use theme_core::profile::GradientStops;
use theme_core::{Color, ColorKey};

/// Resolved colors for one bubble role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleColors {
    /// Fill
    pub fill: Color,
    /// Fill while selected
    pub selected_fill: Color,
    /// Gradient stops above the fill
    pub gradient: GradientStops,
    /// Whether a 2+ stop gradient animates
    pub animated: bool,
    /// Drop shadow color
    pub shadow: Color,
    /// Wash drawn over a selected gradient bubble
    pub selected_overlay: Color,
}

impl BubbleColors {
    /// Resolve the colors for `direction` from `source`
    pub fn resolve(source: &impl ColorSource, direction: Direction) -> Self {
        match direction {
            Direction::Incoming => Self {
                fill: source.color(ColorKey::ChatInBubble),
                selected_fill: source.color(ColorKey::ChatInBubbleSelected),
                gradient: GradientStops::NONE,
                animated: false,
                shadow: source.color(ColorKey::ChatInBubbleShadow),
                selected_overlay: Color::TRANSPARENT,
            },
            Direction::Outgoing => Self {
                fill: source.color(ColorKey::ChatOutBubble),
                selected_fill: source.color(ColorKey::ChatOutBubbleSelected),
                gradient: GradientStops::from_colors([
                    source.color(ColorKey::ChatOutBubbleGradient1),
                    source.color(ColorKey::ChatOutBubbleGradient2),
                    source.color(ColorKey::ChatOutBubbleGradient3),
                ]),
                animated: !source.color(ColorKey::ChatOutBubbleGradientAnimated).is_zero(),
                shadow: source.color(ColorKey::ChatOutBubbleShadow),
                selected_overlay: source.color(ColorKey::ChatOutBubbleGradientSelectedOverlay),
            },
        }
    }

    /// Whether any gradient stop is set
    pub fn has_gradient(&self) -> bool {
        !self.gradient.is_empty()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Input for the animated background provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshGradientRequest {
    /// Colors, last stop first and the fill last
    pub colors: Vec<Color>,
    /// Pattern intensity, 0-100
    pub pattern_intensity: u8,
}

/// What the animated background provider hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshShader {
    /// Shader handle
    pub handle: u64,
    /// Raster pattern handle, if the shader uses one
    pub pattern: Option<u64>,
}

/// Animated background provider
#[cfg_attr(test, mockall::automock)]
pub trait MeshGradientProvider {
    /// Shader for `request`, or `None` while it is not ready
    fn shader(&self, request: &MeshGradientRequest) -> Option<MeshShader>;
}

/// Provider that never has a shader ready
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeshProvider;

impl MeshGradientProvider for NoMeshProvider {
    fn shader(&self, _request: &MeshGradientRequest) -> Option<MeshShader> {
        None
    }
}

/// Paint source for a bubble background
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    /// Single color
    Solid(Color),
    /// Vertical gradient, colors top to bottom
    LinearGradient(Vec<Color>),
    /// Animated mesh gradient
    MeshGradient(MeshGradientRequest),
}

impl BackgroundSource {
    /// Whether the source is a gradient of either kind
    pub fn is_gradient(&self) -> bool {
        !matches!(self, BackgroundSource::Solid(_))
    }

    /// Rank used to compare sources: solid, linear, mesh
    pub fn complexity(&self) -> u8 {
        match self {
            BackgroundSource::Solid(_) => 0,
            BackgroundSource::LinearGradient(_) => 1,
            BackgroundSource::MeshGradient(_) => 2,
        }
    }
}

/// Pick the paint source for `colors`
pub fn select_source(colors: &BubbleColors, selected: bool, pattern_intensity: u8) -> BackgroundSource {
    let stops: Vec<Color> = colors.gradient.iter().collect();
    match stops.len() {
        0 => BackgroundSource::Solid(if selected { colors.selected_fill } else { colors.fill }),
        1 => BackgroundSource::LinearGradient(vec![stops[0], colors.fill]),
        _ => {
            let ordered: Vec<Color> = stops
                .iter()
                .rev()
                .copied()
                .chain(std::iter::once(colors.fill))
                .collect();
            if colors.animated {
                BackgroundSource::MeshGradient(MeshGradientRequest {
                    colors: ordered,
                    pattern_intensity: pattern_intensity.min(100),
                })
            } else {
                BackgroundSource::LinearGradient(ordered)
            }
        }
    }
}
