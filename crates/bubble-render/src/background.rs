//! Bubble backgrounds
//!
//! [`BubblePainter`] composes the outline cache, the paint source and the
//! shadow cache into a [`BubbleBackground`]: an immutable snapshot of what
//! one bubble looks like. Snapshots render into a [`RenderedBubble`] display
//! list, and two of them can be cross-faded with [`CrossFade`].

use crate::geometry::{BubbleGeometry, BubblePath, BubbleRequest, BubbleShapeCache};
use crate::shadow::{AdjacencyCorner, RasterWorker, ShadowCache, ShadowRaster, ShadowSpec};
use crate::source::{
    select_source, BackgroundSource, BubbleColors, MeshGradientProvider, MeshShader,
};
use crate::tokens::BubbleConfig;
use std::sync::Arc;
use theme_core::context::ColorSource;
use theme_core::Color;

// =============================================================================
// Display List
// =============================================================================

/// Resolved paint for a fill layer
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Single color
    Solid(Color),
    /// Vertical gradient over the bubble height, colors top to bottom
    LinearGradient {
        /// Colors, top to bottom
        colors: Vec<Color>,
        /// Gradient height
        height: f32,
    },
    /// Mesh gradient shader from the animated background provider
    Shader(MeshShader),
}

/// One drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleLayer {
    /// 9-slice shadow stretched under the outline
    Shadow {
        /// Shadow mask
        raster: Arc<ShadowRaster>,
        /// Vertical offset
        offset_y: f32,
    },
    /// The bubble fill
    Fill {
        /// Paint
        paint: Paint,
        /// Layer opacity
        alpha: u8,
    },
    /// Wash over a selected gradient bubble
    SelectionWash(Color),
}

/// Outline plus ordered layers, ready for a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBubble {
    /// Shared outline
    pub path: Arc<BubblePath>,
    /// Layers, bottom first
    pub layers: Vec<BubbleLayer>,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable description of one bubble's background
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleBackground {
    path: Arc<BubblePath>,
    paint: Paint,
    gradient: bool,
    selected: bool,
    selected_overlay: Color,
    shadow: Option<(Arc<ShadowRaster>, f32)>,
}

impl BubbleBackground {
    /// Outline
    pub fn path(&self) -> &Arc<BubblePath> {
        &self.path
    }

    /// Fill paint
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Whether the fill is a gradient
    pub fn has_gradient(&self) -> bool {
        self.gradient
    }

    /// Whether the bubble is selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether a shadow will be drawn
    pub fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    fn wash(&self) -> Option<BubbleLayer> {
        (self.gradient && self.selected).then_some(BubbleLayer::SelectionWash(self.selected_overlay))
    }

    /// Display list for this bubble alone
    pub fn render(&self) -> RenderedBubble {
        let mut layers = Vec::with_capacity(3);
        if let Some((raster, offset_y)) = &self.shadow {
            layers.push(BubbleLayer::Shadow { raster: Arc::clone(raster), offset_y: *offset_y });
        }
        layers.push(BubbleLayer::Fill { paint: self.paint.clone(), alpha: 0xFF });
        layers.extend(self.wash());
        RenderedBubble { path: Arc::clone(&self.path), layers }
    }
}

/// Blend between two bubble snapshots
#[derive(Debug, Clone, Copy)]
pub struct CrossFade<'a> {
    /// Outgoing snapshot
    pub from: &'a BubbleBackground,
    /// Incoming snapshot
    pub to: &'a BubbleBackground,
    /// Progress in `[0, 1]`
    pub progress: f32,
}

impl<'a> CrossFade<'a> {
    /// Create a cross-fade
    pub fn new(from: &'a BubbleBackground, to: &'a BubbleBackground, progress: f32) -> Self {
        Self { from, to, progress }
    }

    /// Display list: `from` opaque, `to` at `progress`, then the wash of `to`
    ///
    /// Shadows are never drawn during a cross-fade.
    pub fn compose(&self) -> RenderedBubble {
        let alpha = (255.0 * self.progress.clamp(0.0, 1.0)).round() as u8;
        let mut layers = vec![
            BubbleLayer::Fill { paint: self.from.paint.clone(), alpha: 0xFF },
            BubbleLayer::Fill { paint: self.to.paint.clone(), alpha },
        ];
        layers.extend(self.to.wash());
        RenderedBubble { path: Arc::clone(&self.to.path), layers }
    }
}

// =============================================================================
// Painter
// =============================================================================

/// Builds bubble backgrounds, keeping outline, shader and shadow state
pub struct BubblePainter<P> {
    config: BubbleConfig,
    shapes: BubbleShapeCache,
    shadows: ShadowCache,
    provider: P,
    last_shader: Option<MeshShader>,
}

impl<P: MeshGradientProvider> BubblePainter<P> {
    /// Create a painter
    pub fn new(config: BubbleConfig, provider: P, worker: impl RasterWorker + 'static) -> Self {
        Self {
            shapes: BubbleShapeCache::new(BubbleGeometry::new(config.clone())),
            shadows: ShadowCache::new(worker),
            config,
            provider,
            last_shader: None,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: BubbleConfig) {
        self.shapes.set_geometry(BubbleGeometry::new(config.clone()));
        self.config = config;
    }

    /// The animated background provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The shadow cache
    pub fn shadows_mut(&mut self) -> &mut ShadowCache {
        &mut self.shadows
    }

    /// Snapshot the background for `request`
    pub fn background(
        &mut self,
        colors: &impl ColorSource,
        request: &BubbleRequest,
        selected: bool,
    ) -> BubbleBackground {
        let resolved = BubbleColors::resolve(colors, request.direction);
        let path = self.shapes.path_for(request);
        let source = select_source(&resolved, selected, self.config.pattern_intensity);
        let gradient = source.is_gradient();

        let paint = match source {
            BackgroundSource::Solid(color) => Paint::Solid(color),
            BackgroundSource::LinearGradient(stops) => Paint::LinearGradient {
                colors: stops,
                height: path.height(),
            },
            BackgroundSource::MeshGradient(mesh) => match self.provider.shader(&mesh) {
                Some(shader) => {
                    self.last_shader = Some(shader);
                    Paint::Shader(shader)
                }
                None => match self.last_shader {
                    Some(shader) => Paint::Shader(shader),
                    None => Paint::Solid(resolved.fill),
                },
            },
        };

        let shadow = if gradient || selected || resolved.shadow.alpha() == 0 {
            None
        } else {
            let radii = self.shapes.geometry().corner_radii(&request.adjacency);
            let corner = AdjacencyCorner::from_flags(request.adjacency.top_near, request.adjacency.bottom_near);
            let spec = ShadowSpec::new(radii, resolved.shadow, self.config.shadow);
            self.shadows
                .get(corner, &spec)
                .map(|raster| (raster, self.config.shadow.offset_y))
        };

        BubbleBackground {
            path,
            paint,
            gradient,
            selected,
            selected_overlay: resolved.selected_overlay,
            shadow,
        }
    }

    /// Render `request` directly
    pub fn paint(&mut self, colors: &impl ColorSource, request: &BubbleRequest, selected: bool) -> RenderedBubble {
        self.background(colors, request, selected).render()
    }

    /// Cross-fade from an earlier snapshot to the current colors
    pub fn paint_crossfade(
        &mut self,
        from: &BubbleBackground,
        colors: &impl ColorSource,
        request: &BubbleRequest,
        selected: bool,
        progress: f32,
    ) -> RenderedBubble {
        let to = self.background(colors, request, selected);
        CrossFade::new(from, &to, progress).compose()
    }
}
