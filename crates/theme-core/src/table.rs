//! Color table and the resolution chain
//!
//! Lookup order for a key:
//!
//! 1. the animation overlay, when one is active (no fallback applied)
//! 2. the resolved overlay
//! 3. the resolved overlay entry of the key's fallback target
//! 4. the default table, or [`Color::MISSING`] when even that has no entry
//!
//! Resolution never fails. Unknown data degrades to a loud sentinel color so
//! a broken theme is visible without taking the client down.

use crate::color::Color;
use crate::keys::ColorKey;
use crate::overlay::{AnimationOverlay, ResolvedOverlay};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Fallback graph validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A key falls back to itself
    #[error("Color key {0} falls back to itself")]
    SelfFallback(ColorKey),

    /// A fallback target has its own fallback
    #[error("Fallback chain {0} -> {1} -> {2} is longer than one hop")]
    Chain(ColorKey, ColorKey, ColorKey),

    /// A key was given two fallback targets
    #[error("Color key {0} has more than one fallback")]
    Duplicate(ColorKey),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

// =============================================================================
// Default Table
// =============================================================================

/// Ground-truth colors used when no overlay has an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTable {
    entries: Vec<Option<Color>>,
}

impl DefaultTable {
    /// A table with no entries at all
    pub fn empty() -> Self {
        Self { entries: vec![None; ColorKey::COUNT] }
    }

    /// A table holding every registry default
    pub fn from_registry() -> Self {
        Self {
            entries: ColorKey::ALL.iter().map(|key| Some(key.default_color())).collect(),
        }
    }

    /// Registry defaults with theme-specific seed values layered on top
    pub fn with_seeds(seeds: impl IntoIterator<Item = (ColorKey, Color)>) -> Self {
        let mut table = Self::from_registry();
        for (key, color) in seeds {
            table.entries[key.index()] = Some(color);
        }
        table
    }

    /// Only the given entries; everything else is missing
    pub fn from_entries(entries: impl IntoIterator<Item = (ColorKey, Color)>) -> Self {
        let mut table = Self::empty();
        for (key, color) in entries {
            table.entries[key.index()] = Some(color);
        }
        table
    }

    /// Default for `key`
    pub fn get(&self, key: ColorKey) -> Option<Color> {
        self.entries[key.index()]
    }

    /// Number of keys with a default
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Whether no key has a default
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::from_registry()
    }
}

// =============================================================================
// Fallback Graph
// =============================================================================

/// Single-hop key → key fallbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackGraph {
    edges: HashMap<ColorKey, ColorKey>,
}

static BUILTIN_FALLBACKS: LazyLock<Arc<FallbackGraph>> = LazyLock::new(|| {
    match FallbackGraph::from_pairs(ColorKey::registry_fallbacks()) {
        Ok(graph) => Arc::new(graph),
        Err(err) => {
            tracing::error!("Built-in fallback registry rejected: {}", err);
            Arc::new(FallbackGraph::default())
        }
    }
});

impl FallbackGraph {
    /// Build and validate a graph
    ///
    /// Rejects self edges, duplicate sources, and any target that itself
    /// has a fallback, which also rules out cycles.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ColorKey, ColorKey)>) -> Result<Self> {
        let mut edges = HashMap::new();
        for (key, target) in pairs {
            if key == target {
                return Err(RegistryError::SelfFallback(key));
            }
            if edges.insert(key, target).is_some() {
                return Err(RegistryError::Duplicate(key));
            }
        }

        for (key, target) in &edges {
            if let Some(next) = edges.get(target) {
                return Err(RegistryError::Chain(*key, *target, *next));
            }
        }

        Ok(Self { edges })
    }

    /// The graph declared by the key registry
    pub fn builtin() -> Arc<FallbackGraph> {
        Arc::clone(&BUILTIN_FALLBACKS)
    }

    /// Fallback target of `key`
    pub fn get(&self, key: ColorKey) -> Option<ColorKey> {
        self.edges.get(&key).copied()
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// =============================================================================
// Color Table
// =============================================================================

/// A resolved color together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// The color to paint with
    pub color: Color,
    /// True when no overlay supplied the color
    pub is_default: bool,
}

/// Defaults plus fallback graph for one theme
#[derive(Debug, Clone)]
pub struct ColorTable {
    defaults: Arc<DefaultTable>,
    fallbacks: Arc<FallbackGraph>,
}

impl ColorTable {
    /// Create a table from its parts
    pub fn new(defaults: Arc<DefaultTable>, fallbacks: Arc<FallbackGraph>) -> Self {
        Self { defaults, fallbacks }
    }

    /// Registry defaults with the built-in fallback graph
    pub fn builtin() -> Self {
        Self::new(Arc::new(DefaultTable::from_registry()), FallbackGraph::builtin())
    }

    /// The default table
    pub fn defaults(&self) -> &DefaultTable {
        &self.defaults
    }

    /// The fallback graph
    pub fn fallbacks(&self) -> &FallbackGraph {
        &self.fallbacks
    }

    /// Resolve `key` through the overlays
    pub fn resolve(
        &self,
        key: ColorKey,
        overlay: &ResolvedOverlay,
        animation: Option<&AnimationOverlay>,
    ) -> Color {
        self.resolve_with_origin(key, overlay, animation).color
    }

    /// Resolve `key` and report whether the value is a default
    pub fn resolve_with_origin(
        &self,
        key: ColorKey,
        overlay: &ResolvedOverlay,
        animation: Option<&AnimationOverlay>,
    ) -> Resolved {
        let resolved = self.lookup(key, overlay, animation);
        if key.is_forced_opaque() {
            Resolved { color: resolved.color.opaque(), ..resolved }
        } else {
            resolved
        }
    }

    /// Resolve a key by name; unknown names yield [`Color::MISSING`]
    pub fn resolve_name(
        &self,
        name: &str,
        overlay: &ResolvedOverlay,
        animation: Option<&AnimationOverlay>,
    ) -> Resolved {
        match ColorKey::from_name(name) {
            Some(key) => self.resolve_with_origin(key, overlay, animation),
            None => {
                tracing::warn!("Unknown color key: {}", name);
                Resolved { color: Color::MISSING, is_default: true }
            }
        }
    }

    fn lookup(
        &self,
        key: ColorKey,
        overlay: &ResolvedOverlay,
        animation: Option<&AnimationOverlay>,
    ) -> Resolved {
        if let Some(color) = animation.and_then(|a| a.get(key)) {
            return Resolved { color, is_default: false };
        }
        if let Some(color) = overlay.get(key) {
            return Resolved { color, is_default: false };
        }
        if let Some(color) = self.fallbacks.get(key).and_then(|target| overlay.get(target)) {
            return Resolved { color, is_default: false };
        }
        match self.defaults.get(key) {
            Some(color) => Resolved { color, is_default: true },
            None => Resolved { color: Color::MISSING, is_default: true },
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
