//! Resolved and animation overlays
//!
//! Both overlays are plain key → color maps. They are built in full, then
//! published behind an `Arc` and never mutated again.

use crate::color::Color;
use crate::keys::{ColorKey, KeyGroup};
use std::collections::HashMap;

/// Colors in effect for one theme + accent selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOverlay {
    colors: HashMap<ColorKey, Color>,
}

impl ResolvedOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Color stored for `key`, if any
    pub fn get(&self, key: ColorKey) -> Option<Color> {
        self.colors.get(&key).copied()
    }

    /// Whether the overlay holds `key`
    pub fn contains(&self, key: ColorKey) -> bool {
        self.colors.contains_key(&key)
    }

    /// Store a color while the overlay is being built
    pub fn insert(&mut self, key: ColorKey, color: Color) -> Option<Color> {
        self.colors.insert(key, color)
    }

    /// Drop an entry while the overlay is being built
    pub fn remove(&mut self, key: ColorKey) -> Option<Color> {
        self.colors.remove(&key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = (ColorKey, Color)> + '_ {
        self.colors.iter().map(|(k, c)| (*k, *c))
    }
}

impl FromIterator<(ColorKey, Color)> for ResolvedOverlay {
    fn from_iter<I: IntoIterator<Item = (ColorKey, Color)>>(iter: I) -> Self {
        Self { colors: iter.into_iter().collect() }
    }
}

/// Short-lived colors shown while animating between themes
///
/// Takes precedence over everything for the keys it holds, and is never
/// consulted through the fallback graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationOverlay {
    colors: HashMap<ColorKey, Color>,
}

impl AnimationOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolate every key that differs between two palettes
    ///
    /// `progress` is clamped to `[0, 1]`; channels are blended linearly.
    pub fn blend(
        from: impl Fn(ColorKey) -> Color,
        to: impl Fn(ColorKey) -> Color,
        progress: f32,
    ) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let colors = ColorKey::ALL
            .iter()
            .filter(|key| key.group() != KeyGroup::Value)
            .filter_map(|key| {
                let (a, b) = (from(*key), to(*key));
                (a != b).then(|| (*key, mix(a, b, progress)))
            })
            .collect();
        Self { colors }
    }

    /// Color stored for `key`, if any
    pub fn get(&self, key: ColorKey) -> Option<Color> {
        self.colors.get(&key).copied()
    }

    /// Store a color
    pub fn insert(&mut self, key: ColorKey, color: Color) -> Option<Color> {
        self.colors.insert(key, color)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<(ColorKey, Color)> for AnimationOverlay {
    fn from_iter<I: IntoIterator<Item = (ColorKey, Color)>>(iter: I) -> Self {
        Self { colors: iter.into_iter().collect() }
    }
}

fn mix(a: Color, b: Color, t: f32) -> Color {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::from_argb(
        lerp(a.alpha(), b.alpha()),
        lerp(a.red(), b.red()),
        lerp(a.green(), b.green()),
        lerp(a.blue(), b.blue()),
    )
}
