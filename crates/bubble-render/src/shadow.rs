//! Bubble drop shadows
//!
//! A shadow is a blurred rounded-rect alpha mask with 9-slice insets, so one
//! small raster stretches to any bubble size. The mask carries the bubble's
//! own corner radii in the outgoing frame (sender side on the right); incoming
//! bubbles draw it mirrored, like their outline. Rasters are produced by a
//! [`RasterWorker`] and cached per [`AdjacencyCorner`]; while a new raster is
//! pending the previous one for that corner keeps being used.

use crate::geometry::CornerRadii;
use crate::tokens::{ShadowStyle, MAX_SHADOW_RASTER};
use parking_lot::Mutex;
use std::sync::Arc;
use theme_core::Color;
use thiserror::Error;

/// Shadow raster errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShadowError {
    /// The raster would exceed the allocation limit
    #[error("Shadow raster too large: {0}px")]
    TooLarge(u32),

    /// Radius is negative or not finite
    #[error("Invalid shadow radius: {0}")]
    InvalidRadius(f32),
}

/// Result type for shadow operations
pub type Result<T> = std::result::Result<T, ShadowError>;

// =============================================================================
// Spec & Raster
// =============================================================================

/// Which sender-side corners sit next to another bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacencyCorner {
    /// Lone bubble
    None,
    /// Neighbour above
    TopNear,
    /// Neighbour below
    BottomNear,
    /// Neighbours above and below
    BothNear,
}

impl AdjacencyCorner {
    /// All corner states
    pub const ALL: [AdjacencyCorner; 4] = [
        AdjacencyCorner::None,
        AdjacencyCorner::TopNear,
        AdjacencyCorner::BottomNear,
        AdjacencyCorner::BothNear,
    ];

    /// Corner state from neighbour flags
    pub fn from_flags(top_near: bool, bottom_near: bool) -> Self {
        match (top_near, bottom_near) {
            (false, false) => AdjacencyCorner::None,
            (true, false) => AdjacencyCorner::TopNear,
            (false, true) => AdjacencyCorner::BottomNear,
            (true, true) => AdjacencyCorner::BothNear,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// What a shadow raster is rendered from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    /// Corner radii, outgoing frame
    pub radii: CornerRadii,
    /// Shadow color
    pub color: Color,
    /// Blur and offset
    pub style: ShadowStyle,
}

impl ShadowSpec {
    /// Create a spec
    pub fn new(radii: CornerRadii, color: Color, style: ShadowStyle) -> Self {
        Self { radii, color, style }
    }

    /// Spec with the same radius on every corner
    pub fn uniform(radius: f32, color: Color, style: ShadowStyle) -> Self {
        Self::new(CornerRadii::uniform(radius), color, style)
    }
}

/// Non-stretchable border of a 9-slice raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NineSlice {
    /// Left inset
    pub left: u32,
    /// Top inset
    pub top: u32,
    /// Right inset
    pub right: u32,
    /// Bottom inset
    pub bottom: u32,
}

/// Precomputed shadow mask
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowRaster {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    insets: NineSlice,
    color: Color,
}

impl ShadowRaster {
    /// Render the mask for `spec`
    pub fn render(spec: &ShadowSpec) -> Result<Self> {
        let radii = spec.radii.to_array();
        if let Some(bad) = radii.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(ShadowError::InvalidRadius(*bad));
        }
        let corner = spec.radii.max().ceil() as u32;
        let blur = spec.style.blur;
        let edge = corner.saturating_add(blur.saturating_mul(2));
        let side = edge.saturating_mul(2).saturating_add(1);
        if side > MAX_SHADOW_RASTER {
            return Err(ShadowError::TooLarge(side));
        }

        let n = side as usize;
        let mut alpha = rounded_rect_mask(n, blur as f32, &spec.radii);
        box_blur(&mut alpha, n, blur as usize);

        let tint = spec.color.alpha() as u32;
        for a in alpha.iter_mut() {
            *a = ((*a as u32 * tint + 127) / 255) as u8;
        }

        Ok(Self {
            width: side,
            height: side,
            alpha,
            insets: NineSlice { left: edge, top: edge, right: edge, bottom: edge },
            color: spec.color.with_alpha(0xFF),
        })
    }

    /// Raster width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at `(x, y)`, zero outside the raster
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y * self.width + x) as usize]
    }

    /// Row-major alpha values
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// 9-slice insets
    pub fn insets(&self) -> NineSlice {
        self.insets
    }

    /// Opaque tint applied to the mask
    pub fn color(&self) -> Color {
        self.color
    }
}

fn rounded_rect_mask(n: usize, pad: f32, radii: &CornerRadii) -> Vec<u8> {
    let lo = pad;
    let hi = n as f32 - pad;
    let mid = n as f32 / 2.0;
    let mut mask = vec![0u8; n * n];
    for y in 0..n {
        for x in 0..n {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if px < lo || px > hi || py < lo || py > hi {
                continue;
            }
            // Sender side is on the right
            let radius = match (px >= mid, py >= mid) {
                (true, false) => radii.sender_top,
                (true, true) => radii.sender_bottom,
                (false, false) => radii.far_top,
                (false, true) => radii.far_bottom,
            };
            let cx = px.clamp(lo + radius, hi - radius);
            let cy = py.clamp(lo + radius, hi - radius);
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            // Outside every corner arc the pixel is fully covered
            let coverage = if d == 0.0 { 1.0 } else { (radius - d + 0.5).clamp(0.0, 1.0) };
            mask[y * n + x] = (coverage * 255.0).round() as u8;
        }
    }
    mask
}

fn box_blur(data: &mut [u8], n: usize, r: usize) {
    if r == 0 {
        return;
    }
    let window = (2 * r + 1) as u32;
    let mut line = vec![0u8; n];

    for row in 0..n {
        for (x, out) in line.iter_mut().enumerate() {
            let from = x.saturating_sub(r);
            let to = (x + r).min(n - 1);
            let sum: u32 = (from..=to).map(|i| data[row * n + i] as u32).sum();
            *out = (sum / window) as u8;
        }
        data[row * n..(row + 1) * n].copy_from_slice(&line);
    }

    for col in 0..n {
        for (y, out) in line.iter_mut().enumerate() {
            let from = y.saturating_sub(r);
            let to = (y + r).min(n - 1);
            let sum: u32 = (from..=to).map(|i| data[i * n + col] as u32).sum();
            *out = (sum / window) as u8;
        }
        for (y, value) in line.iter().enumerate() {
            data[y * n + col] = *value;
        }
    }
}

// =============================================================================
// Workers
// =============================================================================

/// Completion callback for a raster job
pub type RasterCallback = Box<dyn FnOnce(Result<ShadowRaster>) + Send>;

/// Runs raster jobs and reports back through a callback
#[cfg_attr(test, mockall::automock)]
pub trait RasterWorker {
    /// Render `spec` and call `done` with the result, now or later
    fn submit(&self, spec: ShadowSpec, done: RasterCallback);
}

/// Worker that renders on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineWorker;

impl RasterWorker for InlineWorker {
    fn submit(&self, spec: ShadowSpec, done: RasterCallback) {
        done(ShadowRaster::render(&spec));
    }
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Pending {
        spec: ShadowSpec,
        previous: Option<Arc<ShadowRaster>>,
    },
    Ready {
        spec: ShadowSpec,
        raster: Arc<ShadowRaster>,
    },
    Failed {
        spec: ShadowSpec,
    },
}

impl Slot {
    fn spec(&self) -> Option<&ShadowSpec> {
        match self {
            Slot::Empty => None,
            Slot::Pending { spec, .. } | Slot::Ready { spec, .. } | Slot::Failed { spec } => Some(spec),
        }
    }

    fn visible(&self) -> Option<Arc<ShadowRaster>> {
        match self {
            Slot::Pending { previous, .. } => previous.clone(),
            Slot::Ready { raster, .. } => Some(Arc::clone(raster)),
            Slot::Empty | Slot::Failed { .. } => None,
        }
    }
}

type Completion = (AdjacencyCorner, ShadowSpec, Result<ShadowRaster>);

/// Shadow rasters per adjacency corner
pub struct ShadowCache {
    worker: Box<dyn RasterWorker>,
    slots: [Slot; 4],
    completed: Arc<Mutex<Vec<Completion>>>,
}

impl std::fmt::Debug for ShadowCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowCache").field("slots", &self.slots).finish()
    }
}

impl Default for ShadowCache {
    fn default() -> Self {
        Self::new(InlineWorker)
    }
}

impl ShadowCache {
    /// Create a cache backed by `worker`
    pub fn new(worker: impl RasterWorker + 'static) -> Self {
        Self {
            worker: Box::new(worker),
            slots: Default::default(),
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Raster to draw for `corner`, requesting a new one when `spec` changed
    ///
    /// Never blocks: while a job is pending the previous raster is returned.
    pub fn get(&mut self, corner: AdjacencyCorner, spec: &ShadowSpec) -> Option<Arc<ShadowRaster>> {
        self.drain_completed();

        let slot = &mut self.slots[corner.index()];
        if slot.spec() != Some(spec) {
            let previous = slot.visible();
            *slot = Slot::Pending { spec: *spec, previous };

            let completed = Arc::clone(&self.completed);
            let job = *spec;
            self.worker.submit(
                job,
                Box::new(move |result| completed.lock().push((corner, job, result))),
            );
            self.drain_completed();
        }

        self.slots[corner.index()].visible()
    }

    /// Whether a job for `corner` is still outstanding
    pub fn is_pending(&self, corner: AdjacencyCorner) -> bool {
        matches!(self.slots[corner.index()], Slot::Pending { .. })
    }

    /// Apply finished jobs
    pub fn drain_completed(&mut self) {
        let finished: Vec<Completion> = std::mem::take(&mut *self.completed.lock());
        for (corner, spec, result) in finished {
            let slot = &mut self.slots[corner.index()];
            if !matches!(slot, Slot::Pending { spec: pending, .. } if *pending == spec) {
                continue;
            }
            *slot = match result {
                Ok(raster) => {
                    tracing::debug!(
                        "Shadow raster ready for {:?}: {}x{}",
                        corner,
                        raster.width(),
                        raster.height()
                    );
                    Slot::Ready { spec, raster: Arc::new(raster) }
                }
                Err(e) => {
                    tracing::warn!("Failed to render shadow for {:?}: {}", corner, e);
                    Slot::Failed { spec }
                }
            };
        }
    }

    /// Drop every cached raster
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
