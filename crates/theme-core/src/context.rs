//! Shared theme state
//!
//! [`ThemeContext`] owns the active theme record, the derived accent profile
//! and the optional animation overlay. Both are published through
//! `arc-swap`: writers build a complete replacement and swap it in, readers
//! take a [`ThemeSnapshot`] and resolve against it without locking.
//!
//! ```rust
//! use theme_core::context::ThemeContext;
//! use theme_core::keys::ColorKey;
//! use theme_core::profile::AccentSelection;
//! use theme_core::theme::light_theme;
//!
//! let ctx = ThemeContext::new(light_theme());
//! let before = ctx.resolve(ColorKey::ActionBarDefault);
//!
//! let accent = ctx.snapshot().theme().accent(1).unwrap();
//! ctx.apply_accent(AccentSelection::new(accent));
//! assert_ne!(ctx.resolve(ColorKey::ActionBarDefault), before);
//! ```

use crate::color::Color;
use crate::keys::ColorKey;
use crate::overlay::AnimationOverlay;
use crate::profile::{AccentProfile, AccentSelection};
use crate::settings::ThemeSettings;
use crate::table::{ColorTable, Resolved};
use crate::theme::{get_theme, ThemeRecord};
use arc_swap::{ArcSwap, ArcSwapOption};
use std::sync::Arc;

/// Anything colors can be resolved from
///
/// Every key read through one source must come from the same palette, so
/// [`ThemeContext`] hands out a [`ThemeSnapshot`] instead of implementing it.
pub trait ColorSource {
    /// Resolve `key` to a concrete color
    fn color(&self, key: ColorKey) -> Color;

    /// Whether the active theme is dark
    fn is_dark(&self) -> bool;
}

// =============================================================================
// Snapshots
// =============================================================================

/// One theme with one accent selection applied
#[derive(Debug, Clone)]
pub struct PaletteSnapshot {
    theme: Arc<ThemeRecord>,
    table: ColorTable,
    selection: AccentSelection,
    profile: AccentProfile,
}

impl PaletteSnapshot {
    /// Derive the palette for `selection` on `theme`
    pub fn build(theme: Arc<ThemeRecord>, selection: AccentSelection) -> Self {
        let table = theme.color_table();
        let profile = AccentProfile::derive(&theme, &selection);
        Self { theme, table, selection, profile }
    }

    /// The theme record
    pub fn theme(&self) -> &Arc<ThemeRecord> {
        &self.theme
    }

    /// The color table
    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// The accent selection
    pub fn selection(&self) -> &AccentSelection {
        &self.selection
    }

    /// The derived accent profile
    pub fn profile(&self) -> &AccentProfile {
        &self.profile
    }
}

/// Consistent view of the context at one point in time
#[derive(Debug, Clone)]
pub struct ThemeSnapshot {
    palette: Arc<PaletteSnapshot>,
    animation: Option<Arc<AnimationOverlay>>,
}

impl ThemeSnapshot {
    /// Resolve `key`
    pub fn resolve(&self, key: ColorKey) -> Color {
        self.resolve_with_origin(key).color
    }

    /// Resolve `key` and report whether the value is a default
    pub fn resolve_with_origin(&self, key: ColorKey) -> Resolved {
        self.palette.table.resolve_with_origin(
            key,
            &self.palette.profile.overlay,
            self.animation.as_deref(),
        )
    }

    /// Resolve a key by its registry name
    pub fn resolve_name(&self, name: &str) -> Resolved {
        self.palette.table.resolve_name(
            name,
            &self.palette.profile.overlay,
            self.animation.as_deref(),
        )
    }

    /// The palette this snapshot reads from
    pub fn palette(&self) -> &Arc<PaletteSnapshot> {
        &self.palette
    }

    /// The active theme
    pub fn theme(&self) -> &ThemeRecord {
        &self.palette.theme
    }

    /// The derived accent profile
    pub fn profile(&self) -> &AccentProfile {
        &self.palette.profile
    }

    /// Whether an animation overlay was active
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

impl ColorSource for ThemeSnapshot {
    fn color(&self, key: ColorKey) -> Color {
        self.resolve(key)
    }

    fn is_dark(&self) -> bool {
        self.palette.theme.is_dark
    }
}

// =============================================================================
// Context
// =============================================================================

/// Active theme state, shared between readers and a rare writer
#[derive(Debug)]
pub struct ThemeContext {
    palette: ArcSwap<PaletteSnapshot>,
    animation: ArcSwapOption<AnimationOverlay>,
}

impl ThemeContext {
    /// Create a context showing `theme` with its own accent
    pub fn new(theme: ThemeRecord) -> Self {
        let selection = AccentSelection::theme_default(&theme);
        Self::with_selection(theme, selection)
    }

    /// Create a context showing `theme` with `selection` applied
    pub fn with_selection(theme: ThemeRecord, selection: AccentSelection) -> Self {
        let palette = PaletteSnapshot::build(Arc::new(theme), selection);
        Self {
            palette: ArcSwap::from_pointee(palette),
            animation: ArcSwapOption::empty(),
        }
    }

    /// Create a context from stored settings
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let theme = get_theme(settings.theme);
        let selection = settings.selection_for(&theme);
        Self::with_selection(theme, selection)
    }

    /// Take a consistent snapshot
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            palette: self.palette.load_full(),
            animation: self.animation.load_full(),
        }
    }

    /// Resolve `key` against the current state
    pub fn resolve(&self, key: ColorKey) -> Color {
        let palette = self.palette.load();
        let animation = self.animation.load();
        palette
            .table
            .resolve(key, &palette.profile.overlay, animation.as_deref())
    }

    /// Rebuild the overlay for a new accent selection
    pub fn apply_accent(&self, selection: AccentSelection) {
        let theme = Arc::clone(&self.palette.load().theme);
        self.palette
            .store(Arc::new(PaletteSnapshot::build(theme, selection)));
    }

    /// Apply stored settings, switching theme if needed
    pub fn apply_settings(&self, settings: &ThemeSettings) {
        let current = self.palette.load();
        if current.theme.name == settings.theme {
            let selection = settings.selection_for(&current.theme);
            if selection != current.selection {
                self.apply_accent(selection);
            }
        } else {
            let theme = get_theme(settings.theme);
            let selection = settings.selection_for(&theme);
            self.switch_theme(theme, selection);
        }
    }

    /// Replace the theme and its overlay wholesale
    pub fn switch_theme(&self, theme: ThemeRecord, selection: AccentSelection) {
        tracing::info!("Switching theme to {}", theme.name);
        self.palette
            .store(Arc::new(PaletteSnapshot::build(Arc::new(theme), selection)));
    }

    /// Install an animation overlay
    pub fn begin_animation(&self, overlay: AnimationOverlay) {
        self.animation.store(Some(Arc::new(overlay)));
    }

    /// Show a blend from `previous` to the current palette
    pub fn animate_from(&self, previous: &ThemeSnapshot, progress: f32) {
        let current = self.palette.load_full();
        let overlay = AnimationOverlay::blend(
            |key| {
                previous
                    .palette
                    .table
                    .resolve(key, &previous.palette.profile.overlay, None)
            },
            |key| current.table.resolve(key, &current.profile.overlay, None),
            progress,
        );
        self.begin_animation(overlay);
    }

    /// Drop the animation overlay
    pub fn end_animation(&self) {
        self.animation.store(None);
    }

    /// Whether an animation overlay is installed
    pub fn is_animating(&self) -> bool {
        self.animation.load().is_some()
    }
}
