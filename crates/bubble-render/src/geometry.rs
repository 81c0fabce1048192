//! Bubble outline geometry
//!
//! [`BubbleGeometry`] turns bounds, direction, bubble type and adjacency into
//! a closed outline path in bubble-local coordinates. Paths are built for an
//! outgoing bubble (sender side on the right) and mirrored for incoming ones.
//!
//! [`BubbleShapeCache`] keeps the last path and hands out the same shared
//! object until the inputs change.

use crate::tokens::{radius, spacing, BubbleConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Inputs
// =============================================================================

/// A point in bubble-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f32,
    /// Vertical position, growing downwards
    pub y: f32,
}

impl Point {
    /// Create a point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Width, never negative
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    /// Height, never negative
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Which side sent the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received message, sender side on the left
    Incoming,
    /// Own message, sender side on the right
    Outgoing,
}

/// What the bubble contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleType {
    /// Text message, drawn with a tail
    #[default]
    Text,
    /// Photo or video
    Media,
    /// Link or reply preview
    Preview,
}

/// Neighbour state and shape overrides for one bubble
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleAdjacency {
    /// A bubble from the same group sits directly above
    pub top_near: bool,
    /// A bubble from the same group sits directly below
    pub bottom_near: bool,
    /// Bubble type
    pub bubble_type: BubbleType,
    /// Radius applied to every corner when set
    pub override_radius: Option<f32>,
}

impl BubbleAdjacency {
    /// A lone bubble of `bubble_type`
    pub fn new(bubble_type: BubbleType) -> Self {
        Self { bubble_type, ..Self::default() }
    }

    /// Set neighbour state
    pub fn near(mut self, top: bool, bottom: bool) -> Self {
        self.top_near = top;
        self.bottom_near = bottom;
        self
    }

    /// Set an override radius
    pub fn with_override_radius(mut self, radius: f32) -> Self {
        self.override_radius = Some(radius);
        self
    }
}

/// Visible part of the scrolling list, in the same space as bubble bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top of the visible window
    pub top: f32,
    /// Height of the visible window
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Bottom of the visible window
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// How much of the list is being redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedrawMode {
    /// Only the visible part; cached shapes may be reused
    #[default]
    Clipped,
    /// Everything; cached shapes are rebuilt
    Full,
}

/// Everything needed to build one outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleRequest {
    /// Bubble bounds in list coordinates
    pub bounds: Rect,
    /// Message direction
    pub direction: Direction,
    /// Neighbours, type and radius override
    pub adjacency: BubbleAdjacency,
    /// Draw every edge even when off-screen (snapshots, thumbnails)
    pub draw_full_bubble: bool,
    /// Visible window, `None` when everything is visible
    pub viewport: Option<Viewport>,
    /// Redraw mode
    pub redraw: RedrawMode,
}

impl BubbleRequest {
    /// A fully visible bubble
    pub fn new(bounds: Rect, direction: Direction, adjacency: BubbleAdjacency) -> Self {
        Self {
            bounds,
            direction,
            adjacency,
            draw_full_bubble: false,
            viewport: None,
            redraw: RedrawMode::Clipped,
        }
    }

    /// Set the visible window
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Set the redraw mode
    pub fn with_redraw(mut self, redraw: RedrawMode) -> Self {
        self.redraw = redraw;
        self
    }

    /// Force every edge to be drawn
    pub fn full_bubble(mut self) -> Self {
        self.draw_full_bubble = true;
        self
    }

    /// Whether the top and bottom edges are entirely inside the viewport
    pub fn edge_visibility(&self) -> (bool, bool) {
        match self.viewport {
            None => (true, true),
            Some(viewport) => (
                self.bounds.top + spacing::VERTICAL_INSET >= viewport.top,
                self.bounds.bottom - spacing::VERTICAL_INSET <= viewport.bottom(),
            ),
        }
    }
}

// =============================================================================
// Path
// =============================================================================

/// One outline segment
///
/// Arc angles are in degrees, clockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Start a contour
    MoveTo(Point),
    /// Straight segment
    LineTo(Point),
    /// Elliptical arc inscribed in `rect`
    ArcTo {
        /// Oval bounds
        rect: Rect,
        /// Start angle
        start: f32,
        /// Sweep angle
        sweep: f32,
    },
    /// Quadratic curve
    QuadTo {
        /// Control point
        control: Point,
        /// End point
        to: Point,
    },
    /// Close the contour
    Close,
}

impl PathCommand {
    fn mirrored(self, width: f32) -> Self {
        let flip = |p: Point| Point::new(width - p.x, p.y);
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(flip(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(flip(p)),
            PathCommand::ArcTo { rect, start, sweep } => PathCommand::ArcTo {
                rect: Rect::new(width - rect.right, rect.top, width - rect.left, rect.bottom),
                start: (540.0 - start) % 360.0,
                sweep: -sweep,
            },
            PathCommand::QuadTo { control, to } => PathCommand::QuadTo {
                control: flip(control),
                to: flip(to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// A closed bubble outline in bubble-local coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BubblePath {
    commands: Vec<PathCommand>,
    width: f32,
    height: f32,
}

impl BubblePath {
    /// Segments in drawing order
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Width of the local space
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the local space
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether the outline includes a tail
    pub fn has_tail(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::QuadTo { .. }))
    }

    /// Number of rounded corners, the tail tip included
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::ArcTo { .. }))
            .count()
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Corner radii relative to the sender side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    /// Top corner on the sender side
    pub sender_top: f32,
    /// Bottom corner on the sender side
    pub sender_bottom: f32,
    /// Top corner away from the sender
    pub far_top: f32,
    /// Bottom corner away from the sender
    pub far_bottom: f32,
}

impl CornerRadii {
    /// Same radius on every corner
    pub fn uniform(r: f32) -> Self {
        Self { sender_top: r, sender_bottom: r, far_top: r, far_bottom: r }
    }

    /// Corners in a fixed order: sender top, sender bottom, far top, far bottom
    pub fn to_array(self) -> [f32; 4] {
        [self.sender_top, self.sender_bottom, self.far_top, self.far_bottom]
    }

    /// Largest corner radius
    pub fn max(self) -> f32 {
        self.to_array().into_iter().fold(0.0, f32::max)
    }

    fn limited(self, max: f32) -> Self {
        Self {
            sender_top: self.sender_top.min(max),
            sender_bottom: self.sender_bottom.min(max),
            far_top: self.far_top.min(max),
            far_bottom: self.far_bottom.min(max),
        }
    }
}

/// Outline builder
#[derive(Debug, Clone, Default)]
pub struct BubbleGeometry {
    config: BubbleConfig,
}

impl BubbleGeometry {
    /// Create a builder with `config`
    pub fn new(config: BubbleConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Corner radii for `adjacency`
    pub fn corner_radii(&self, adjacency: &BubbleAdjacency) -> CornerRadii {
        if let Some(r) = adjacency.override_radius {
            return CornerRadii::uniform(r.max(0.0));
        }
        if adjacency.bubble_type == BubbleType::Preview {
            return CornerRadii::uniform(radius::PREVIEW);
        }
        let r = self.config.bubble_radius;
        let near = self.config.near_radius();
        CornerRadii {
            sender_top: if adjacency.top_near { near } else { r },
            sender_bottom: if adjacency.bottom_near { near } else { r },
            far_top: r,
            far_bottom: r,
        }
    }

    /// Build the outline for `request`
    pub fn outline(&self, request: &BubbleRequest) -> BubblePath {
        let (full_top, full_bottom) = request.edge_visibility();
        self.outline_with_edges(request, full_top, full_bottom)
    }

    fn outline_with_edges(&self, request: &BubbleRequest, full_top: bool, full_bottom: bool) -> BubblePath {
        let width = request.bounds.width();
        let height = request.bounds.height();
        let adjacency = &request.adjacency;

        let clip_top = !full_top && !request.draw_full_bubble;
        let clip_bottom = !full_bottom && !request.draw_full_bubble;

        let left = 0.0;
        let right = if adjacency.bubble_type == BubbleType::Text {
            (width - spacing::TAIL_WIDTH).max(left)
        } else {
            width
        };
        let top = spacing::VERTICAL_INSET.min(height / 2.0);
        let bottom = (height - spacing::VERTICAL_INSET).max(top);

        let (visible_top, visible_bottom) = match request.viewport {
            Some(v) => (v.top - request.bounds.top, v.bottom() - request.bounds.top),
            None => (top, bottom),
        };
        let top_y = if clip_top { visible_top.clamp(top, bottom) } else { top };
        let bottom_y = if clip_bottom { visible_bottom.clamp(top_y, bottom) } else { bottom };

        let r = self
            .corner_radii(adjacency)
            .limited(((right - left).min(bottom - top) / 2.0).max(0.0));
        let tail = adjacency.bubble_type == BubbleType::Text && !adjacency.bottom_near && !clip_bottom;

        let mut cmds = Vec::with_capacity(12);

        if clip_top {
            cmds.push(PathCommand::MoveTo(Point::new(left, top_y)));
            cmds.push(PathCommand::LineTo(Point::new(right, top_y)));
        } else {
            cmds.push(PathCommand::MoveTo(Point::new(left + r.far_top, top)));
            cmds.push(PathCommand::LineTo(Point::new(right - r.sender_top, top)));
            cmds.push(PathCommand::ArcTo {
                rect: Rect::new(right - 2.0 * r.sender_top, top, right, top + 2.0 * r.sender_top),
                start: 270.0,
                sweep: 90.0,
            });
        }

        if clip_bottom {
            cmds.push(PathCommand::LineTo(Point::new(right, bottom_y)));
            cmds.push(PathCommand::LineTo(Point::new(left, bottom_y)));
        } else {
            if tail {
                let tip = radius::TAIL_TIP;
                let tail_top = (bottom - spacing::TAIL_HEIGHT).max(top_y + r.sender_top);
                cmds.push(PathCommand::LineTo(Point::new(right, tail_top)));
                cmds.push(PathCommand::QuadTo {
                    control: Point::new(right, bottom - 2.0 * tip),
                    to: Point::new(width - tip, bottom - 2.0 * tip),
                });
                cmds.push(PathCommand::ArcTo {
                    rect: Rect::new(width - 2.0 * tip, bottom - 2.0 * tip, width, bottom),
                    start: 270.0,
                    sweep: 180.0,
                });
            } else {
                cmds.push(PathCommand::LineTo(Point::new(right, bottom - r.sender_bottom)));
                cmds.push(PathCommand::ArcTo {
                    rect: Rect::new(right - 2.0 * r.sender_bottom, bottom - 2.0 * r.sender_bottom, right, bottom),
                    start: 0.0,
                    sweep: 90.0,
                });
            }
            cmds.push(PathCommand::LineTo(Point::new(left + r.far_bottom, bottom)));
            cmds.push(PathCommand::ArcTo {
                rect: Rect::new(left, bottom - 2.0 * r.far_bottom, left + 2.0 * r.far_bottom, bottom),
                start: 90.0,
                sweep: 90.0,
            });
        }

        if clip_top {
            cmds.push(PathCommand::LineTo(Point::new(left, top_y)));
        } else {
            cmds.push(PathCommand::LineTo(Point::new(left, top + r.far_top)));
            cmds.push(PathCommand::ArcTo {
                rect: Rect::new(left, top, left + 2.0 * r.far_top, top + 2.0 * r.far_top),
                start: 180.0,
                sweep: 90.0,
            });
        }
        cmds.push(PathCommand::Close);

        if request.direction == Direction::Incoming {
            cmds = cmds.into_iter().map(|c| c.mirrored(width)).collect();
        }

        BubblePath { commands: cmds, width, height }
    }
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct ShapeKey {
    bounds: Rect,
    draw_full_top: bool,
    draw_full_bottom: bool,
}

/// Last outline built for one bubble
#[derive(Debug, Default)]
pub struct BubbleShapeCache {
    geometry: BubbleGeometry,
    key: Option<ShapeKey>,
    shape: Option<(Direction, BubbleAdjacency, bool)>,
    redraw: RedrawMode,
    path: Option<Arc<BubblePath>>,
}

impl BubbleShapeCache {
    /// Create an empty cache
    pub fn new(geometry: BubbleGeometry) -> Self {
        Self { geometry, ..Self::default() }
    }

    /// The geometry used to rebuild paths
    pub fn geometry(&self) -> &BubbleGeometry {
        &self.geometry
    }

    /// Replace the geometry, dropping the cached path
    pub fn set_geometry(&mut self, geometry: BubbleGeometry) {
        self.geometry = geometry;
        self.clear();
    }

    /// Set the redraw mode for the next check
    pub fn set_redraw_mode(&mut self, redraw: RedrawMode) {
        self.redraw = redraw;
    }

    /// Whether the cached path must be rebuilt
    pub fn invalidate(&self, bounds: Rect, draw_full_top: bool, draw_full_bottom: bool) -> bool {
        let key = ShapeKey { bounds, draw_full_top, draw_full_bottom };
        self.path.is_none()
            || self.key != Some(key)
            || !draw_full_top
            || !draw_full_bottom
            || self.redraw == RedrawMode::Full
    }

    /// The outline for `request`, rebuilt only when needed
    pub fn path_for(&mut self, request: &BubbleRequest) -> Arc<BubblePath> {
        self.redraw = request.redraw;
        let (full_top, full_bottom) = request.edge_visibility();
        let shape = (request.direction, request.adjacency, request.draw_full_bubble);

        if let Some(path) = &self.path {
            if self.shape == Some(shape) && !self.invalidate(request.bounds, full_top, full_bottom) {
                return Arc::clone(path);
            }
        }

        tracing::trace!(
            "Rebuilding bubble outline: {}x{}",
            request.bounds.width(),
            request.bounds.height()
        );
        let path = Arc::new(self.geometry.outline_with_edges(request, full_top, full_bottom));
        self.key = Some(ShapeKey {
            bounds: request.bounds,
            draw_full_top: full_top,
            draw_full_bottom: full_bottom,
        });
        self.shape = Some(shape);
        self.path = Some(Arc::clone(&path));
        path
    }

    /// The cached path, if any
    pub fn cached(&self) -> Option<&Arc<BubblePath>> {
        self.path.as_ref()
    }

    /// Drop the cached path
    pub fn clear(&mut self) {
        self.key = None;
        self.shape = None;
        self.path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 100.0, 200.0, 160.0)
    }

    fn text_request(direction: Direction) -> BubbleRequest {
        BubbleRequest::new(bounds(), direction, BubbleAdjacency::new(BubbleType::Text))
    }

    fn max_x(path: &BubblePath) -> f32 {
        path.commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p.x),
                PathCommand::QuadTo { to, .. } => Some(to.x),
                PathCommand::ArcTo { rect, .. } => Some(rect.right),
                PathCommand::Close => None,
            })
            .fold(f32::MIN, f32::max)
    }

    // ==========================================================================
    // Radius Tests
    // ==========================================================================

    #[test]
    fn test_default_radii() {
        let geometry = BubbleGeometry::default();
        let radii = geometry.corner_radii(&BubbleAdjacency::new(BubbleType::Text));
        assert_eq!(radii, CornerRadii::uniform(17.0));
    }

    #[test]
    fn test_near_corners_on_sender_side() {
        let geometry = BubbleGeometry::default();
        let radii = geometry.corner_radii(&BubbleAdjacency::new(BubbleType::Text).near(true, true));
        assert_eq!(radii.sender_top, 5.0);
        assert_eq!(radii.sender_bottom, 5.0);
        assert_eq!(radii.far_top, 17.0);
        assert_eq!(radii.far_bottom, 17.0);
    }

    #[test]
    fn test_near_radius_follows_small_bubble_radius() {
        let geometry = BubbleGeometry::new(BubbleConfig::new().bubble_radius(3.0));
        let radii = geometry.corner_radii(&BubbleAdjacency::new(BubbleType::Media).near(true, false));
        assert_eq!(radii.sender_top, 3.0);
        assert_eq!(radii.sender_bottom, 3.0);
    }

    #[test]
    fn test_preview_and_override_radii() {
        let geometry = BubbleGeometry::default();
        let preview = geometry.corner_radii(&BubbleAdjacency::new(BubbleType::Preview).near(true, true));
        assert_eq!(preview, CornerRadii::uniform(6.0));

        let adjacency = BubbleAdjacency::new(BubbleType::Preview)
            .near(true, false)
            .with_override_radius(9.0);
        assert_eq!(geometry.corner_radii(&adjacency), CornerRadii::uniform(9.0));
    }

    // ==========================================================================
    // Outline Tests
    // ==========================================================================

    #[test]
    fn test_text_bubble_has_tail() {
        let path = BubbleGeometry::default().outline(&text_request(Direction::Outgoing));
        assert!(path.has_tail());
        assert_eq!(path.arc_count(), 4);
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(max_x(&path), 200.0);
    }

    #[test]
    fn test_near_bottom_drops_tail() {
        let request = BubbleRequest::new(
            bounds(),
            Direction::Outgoing,
            BubbleAdjacency::new(BubbleType::Text).near(false, true),
        );
        let path = BubbleGeometry::default().outline(&request);
        assert!(!path.has_tail());
        assert_eq!(max_x(&path), 200.0 - spacing::TAIL_WIDTH);
    }

    #[test]
    fn test_media_bubble_has_no_tail() {
        let request = BubbleRequest::new(bounds(), Direction::Outgoing, BubbleAdjacency::new(BubbleType::Media));
        let path = BubbleGeometry::default().outline(&request);
        assert!(!path.has_tail());
        assert_eq!(max_x(&path), 200.0);
    }

    #[test]
    fn test_vertical_inset() {
        let path = BubbleGeometry::default().outline(&text_request(Direction::Outgoing));
        match path.commands()[0] {
            PathCommand::MoveTo(p) => assert_eq!(p.y, spacing::VERTICAL_INSET),
            other => panic!("unexpected first command: {:?}", other),
        }
    }

    #[test]
    fn test_incoming_is_mirrored() {
        let geometry = BubbleGeometry::default();
        let outgoing = geometry.outline(&text_request(Direction::Outgoing));
        let incoming = geometry.outline(&text_request(Direction::Incoming));
        assert_eq!(outgoing.commands().len(), incoming.commands().len());

        for (out, inc) in outgoing.commands().iter().zip(incoming.commands()) {
            match (out, inc) {
                (PathCommand::MoveTo(a), PathCommand::MoveTo(b))
                | (PathCommand::LineTo(a), PathCommand::LineTo(b)) => {
                    assert_eq!(b.x, 200.0 - a.x);
                    assert_eq!(b.y, a.y);
                }
                (PathCommand::ArcTo { rect: a, sweep: sa, .. }, PathCommand::ArcTo { rect: b, sweep: sb, .. }) => {
                    assert_eq!(b.left, 200.0 - a.right);
                    assert_eq!(*sb, -*sa);
                }
                (PathCommand::QuadTo { to: a, .. }, PathCommand::QuadTo { to: b, .. }) => {
                    assert_eq!(b.x, 200.0 - a.x);
                }
                (PathCommand::Close, PathCommand::Close) => {}
                other => panic!("mismatched commands: {:?}", other),
            }
        }
    }

    #[test]
    fn test_clipped_top_skips_corner_arcs() {
        let request = text_request(Direction::Outgoing).with_viewport(Viewport::new(120.0, 400.0));
        assert_eq!(request.edge_visibility(), (false, true));

        let path = BubbleGeometry::default().outline(&request);
        assert_eq!(path.commands()[0], PathCommand::MoveTo(Point::new(0.0, 20.0)));
        // Two top corners gone, tail tip and bottom corner remain
        assert_eq!(path.arc_count(), 2);
    }

    #[test]
    fn test_full_bubble_ignores_viewport() {
        let request = text_request(Direction::Outgoing)
            .with_viewport(Viewport::new(120.0, 10.0))
            .full_bubble();
        let path = BubbleGeometry::default().outline(&request);
        assert_eq!(path.arc_count(), 4);
        assert!(path.has_tail());
    }

    // ==========================================================================
    // Cache Tests
    // ==========================================================================

    #[test]
    fn test_cache_reuses_path() {
        let mut cache = BubbleShapeCache::default();
        let request = text_request(Direction::Outgoing);
        let first = cache.path_for(&request);
        let second = cache.path_for(&request);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!cache.invalidate(bounds(), true, true));
    }

    #[test]
    fn test_cache_rebuilds_on_bottom_change() {
        let mut cache = BubbleShapeCache::default();
        let first = cache.path_for(&text_request(Direction::Outgoing));

        let mut taller = text_request(Direction::Outgoing);
        taller.bounds.bottom += 1.0;
        assert!(cache.invalidate(taller.bounds, true, true));
        let second = cache.path_for(&taller);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.height(), 61.0);
    }

    #[test]
    fn test_cache_rebuilds_when_edge_hidden() {
        let mut cache = BubbleShapeCache::default();
        let request = text_request(Direction::Outgoing).with_viewport(Viewport::new(120.0, 400.0));
        let first = cache.path_for(&request);
        let second = cache.path_for(&request);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_rebuilds_on_full_redraw() {
        let mut cache = BubbleShapeCache::default();
        let request = text_request(Direction::Outgoing).with_redraw(RedrawMode::Full);
        let first = cache.path_for(&request);
        let second = cache.path_for(&request);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_rebuilds_on_adjacency_change() {
        let mut cache = BubbleShapeCache::default();
        let first = cache.path_for(&text_request(Direction::Outgoing));

        let mut request = text_request(Direction::Outgoing);
        request.adjacency.bottom_near = true;
        let second = cache.path_for(&request);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!second.has_tail());
    }
}
