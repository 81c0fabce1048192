//! User theming settings
//!
//! The persisted record the settings store hands to the engine. Values are
//! clamped when set and when converted, so a hand-edited or stale record can
//! never push the engine outside its ranges.

use crate::profile::{AccentSelection, BackgroundOverride, OutgoingBubbleColors};
use crate::theme::{ThemeName, ThemeRecord};
use serde::{Deserialize, Serialize};

/// Largest configurable bubble radius
pub const MAX_BUBBLE_RADIUS: u8 = 17;

/// Largest pattern intensity
pub const MAX_PATTERN_INTENSITY: u8 = 100;

/// Pattern rotation step in degrees
pub const PATTERN_ROTATION_STEP: u16 = 45;

/// Theming settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Selected theme
    #[serde(default)]
    pub theme: ThemeName,

    /// Accent preset id, `None` for the theme's own accent
    #[serde(default)]
    pub accent_id: Option<usize>,

    /// Accent preset id used for outgoing messages
    #[serde(default)]
    pub secondary_accent_id: Option<usize>,

    /// Bubble corner radius
    #[serde(default = "default_bubble_radius")]
    pub bubble_radius: u8,

    /// Wallpaper pattern intensity, 0-100
    #[serde(default = "default_pattern_intensity")]
    pub pattern_intensity: u8,

    /// Wallpaper pattern rotation in degrees
    #[serde(default = "default_pattern_rotation")]
    pub pattern_rotation: u16,

    /// Custom outgoing bubble colors
    #[serde(default)]
    pub outgoing: Option<OutgoingBubbleColors>,

    /// Wallpaper overrides
    #[serde(default)]
    pub background: Option<BackgroundOverride>,
}

fn default_bubble_radius() -> u8 {
    MAX_BUBBLE_RADIUS
}

fn default_pattern_intensity() -> u8 {
    50
}

fn default_pattern_rotation() -> u16 {
    PATTERN_ROTATION_STEP
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            accent_id: None,
            secondary_accent_id: None,
            bubble_radius: default_bubble_radius(),
            pattern_intensity: default_pattern_intensity(),
            pattern_rotation: default_pattern_rotation(),
            outgoing: None,
            background: None,
        }
    }
}

impl ThemeSettings {
    /// Set bubble radius
    pub fn set_bubble_radius(&mut self, radius: u8) {
        self.bubble_radius = radius.min(MAX_BUBBLE_RADIUS);
    }

    /// Set pattern intensity
    pub fn set_pattern_intensity(&mut self, intensity: u8) {
        self.pattern_intensity = intensity.min(MAX_PATTERN_INTENSITY);
    }

    /// Set pattern rotation, snapped to the nearest step
    pub fn set_pattern_rotation(&mut self, degrees: u16) {
        self.pattern_rotation = snap_rotation(degrees);
    }

    /// Bubble radius within range
    pub fn effective_bubble_radius(&self) -> u8 {
        self.bubble_radius.min(MAX_BUBBLE_RADIUS)
    }

    /// Pattern intensity within range
    pub fn effective_pattern_intensity(&self) -> u8 {
        self.pattern_intensity.min(MAX_PATTERN_INTENSITY)
    }

    /// Pattern rotation snapped to a step
    pub fn effective_pattern_rotation(&self) -> u16 {
        snap_rotation(self.pattern_rotation)
    }

    /// Accent selection for `theme`
    ///
    /// Unknown preset ids fall back to the theme's own accent.
    pub fn selection_for(&self, theme: &ThemeRecord) -> AccentSelection {
        let accent = self
            .accent_id
            .and_then(|id| theme.accent(id))
            .unwrap_or(theme.accent_base);
        let secondary_accent = self.secondary_accent_id.and_then(|id| theme.accent(id));

        AccentSelection {
            accent,
            secondary_accent,
            outgoing: self.outgoing,
            background: self.background,
        }
    }
}

fn snap_rotation(degrees: u16) -> u16 {
    let step = PATTERN_ROTATION_STEP;
    ((degrees % 360 + step / 2) / step * step) % 360
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::theme::{dark_theme, light_theme};

    #[test]
    fn test_default_settings() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.theme, ThemeName::Light);
        assert_eq!(settings.bubble_radius, 17);
        assert_eq!(settings.pattern_intensity, 50);
        assert_eq!(settings.pattern_rotation, 45);
        assert!(settings.accent_id.is_none());
    }

    // ==========================================================================
    // Clamping Tests
    // ==========================================================================

    #[test]
    fn test_bubble_radius_clamping() {
        let mut settings = ThemeSettings::default();
        settings.set_bubble_radius(9);
        assert_eq!(settings.bubble_radius, 9);

        settings.set_bubble_radius(40);
        assert_eq!(settings.bubble_radius, 17);
    }

    #[test]
    fn test_pattern_intensity_clamping() {
        let mut settings = ThemeSettings::default();
        settings.set_pattern_intensity(200);
        assert_eq!(settings.pattern_intensity, 100);

        settings.pattern_intensity = 180;
        assert_eq!(settings.effective_pattern_intensity(), 100);
    }

    #[test]
    fn test_pattern_rotation_snapping() {
        let mut settings = ThemeSettings::default();
        settings.set_pattern_rotation(100);
        assert_eq!(settings.pattern_rotation, 90);

        settings.set_pattern_rotation(350);
        assert_eq!(settings.pattern_rotation, 0);

        settings.set_pattern_rotation(405);
        assert_eq!(settings.pattern_rotation, 45);
    }

    // ==========================================================================
    // Selection Tests
    // ==========================================================================

    #[test]
    fn test_selection_uses_preset() {
        let theme = dark_theme();
        let settings = ThemeSettings {
            accent_id: Some(2),
            secondary_accent_id: Some(1),
            ..ThemeSettings::default()
        };
        let selection = settings.selection_for(&theme);
        assert_eq!(Some(selection.accent), theme.accent(2));
        assert_eq!(selection.secondary_accent, theme.accent(1));
    }

    #[test]
    fn test_selection_unknown_preset_uses_theme_accent() {
        let theme = light_theme();
        let settings = ThemeSettings {
            accent_id: Some(99),
            ..ThemeSettings::default()
        };
        assert_eq!(settings.selection_for(&theme), AccentSelection::theme_default(&theme));
    }

    // ==========================================================================
    // Serialization Tests
    // ==========================================================================

    #[test]
    fn test_settings_serialization() {
        let settings = ThemeSettings {
            theme: ThemeName::Dim,
            accent_id: Some(3),
            bubble_radius: 8,
            background: Some(BackgroundOverride {
                color: Some(Color(0xFF12_3456)),
                ..BackgroundOverride::default()
            }),
            ..ThemeSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"bubbleRadius\":8"));
        assert!(json.contains("\"theme\":\"dim\""));

        let deserialized: ThemeSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, settings);
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: ThemeSettings = serde_json::from_str(r#"{"accentId":1}"#).unwrap();
        assert_eq!(settings.accent_id, Some(1));
        assert_eq!(settings.bubble_radius, 17);
        assert_eq!(settings.pattern_intensity, 50);
    }
}
