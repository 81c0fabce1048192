//! Theme records
//!
//! A theme record is what a theme package loader hands to the engine: seed
//! colors layered over the registry defaults, the accent the theme was
//! authored around, the accent presets offered for it, and whether it is a
//! dark theme.
//!
//! # Themes
//!
//! Three built-in themes are provided:
//! - Light: bright chat with light green outgoing bubbles
//! - Dark: near-black chat with blue outgoing bubbles
//! - Dim: a softer blue-gray dark theme
//!
//! # Usage
//!
//! ```rust
//! use theme_core::theme::{get_theme, ThemeName};
//! use theme_core::keys::ColorKey;
//!
//! let theme = get_theme(ThemeName::Dark);
//! assert!(theme.is_dark);
//! let table = theme.color_table();
//! let fill = table.defaults().get(ColorKey::ChatOutBubble);
//! assert!(fill.is_some());
//! ```

use crate::color::Color;
use crate::keys::ColorKey;
use crate::table::{ColorTable, DefaultTable, FallbackGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Theme Name
// =============================================================================

/// Built-in theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
    /// Dim theme (softer dark)
    Dim,
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
            ThemeName::Dim => write!(f, "Dim"),
        }
    }
}

// =============================================================================
// Theme Record
// =============================================================================

/// Everything the engine needs to know about one theme
#[derive(Debug, Clone)]
pub struct ThemeRecord {
    /// Theme name
    pub name: ThemeName,
    /// Whether the theme has a dark background
    pub is_dark: bool,
    /// Accent the theme's colors were authored around
    pub accent_base: Color,
    /// Accent presets, indexed by accent id
    pub accents: Vec<Color>,
    /// Default colors
    pub defaults: Arc<DefaultTable>,
}

impl ThemeRecord {
    /// Create a record from seed colors layered over the registry defaults
    pub fn new(
        name: ThemeName,
        is_dark: bool,
        accent_base: Color,
        accents: Vec<Color>,
        seeds: impl IntoIterator<Item = (ColorKey, Color)>,
    ) -> Self {
        Self {
            name,
            is_dark,
            accent_base,
            accents,
            defaults: Arc::new(DefaultTable::with_seeds(seeds)),
        }
    }

    /// Accent preset by id
    pub fn accent(&self, id: usize) -> Option<Color> {
        self.accents.get(id).copied()
    }

    /// Color table over this theme's defaults and the built-in fallbacks
    pub fn color_table(&self) -> ColorTable {
        ColorTable::new(Arc::clone(&self.defaults), FallbackGraph::builtin())
    }
}

impl PartialEq for ThemeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.is_dark == other.is_dark
            && self.accent_base == other.accent_base
            && self.accents == other.accents
            && *self.defaults == *other.defaults
    }
}

// =============================================================================
// Built-in Themes
// =============================================================================

/// Accent presets shared by the light theme
const LIGHT_ACCENTS: [u32; 8] = [
    0xFF58_90C5, 0xFF7E_5FE5, 0xFFFF_5FA9, 0xFFE9_5D44, 0xFFF5_9B39, 0xFF45_BE5F, 0xFF36_C0C0,
    0xFF7F_8B9A,
];

/// Accent presets shared by the dark themes
const DARK_ACCENTS: [u32; 8] = [
    0xFF3E_88F7, 0xFF9F_65EB, 0xFFFF_6FB4, 0xFFF2_5D4E, 0xFFF7_A23A, 0xFF5A_C96B, 0xFF3D_C4C5,
    0xFF8C_99A8,
];

/// Create the light theme
pub fn light_theme() -> ThemeRecord {
    ThemeRecord::new(
        ThemeName::Light,
        false,
        Color(0xFF58_90C5),
        LIGHT_ACCENTS.map(Color).to_vec(),
        [],
    )
}

/// Create the dark theme
pub fn dark_theme() -> ThemeRecord {
    ThemeRecord::new(
        ThemeName::Dark,
        true,
        Color(0xFF3E_88F7),
        DARK_ACCENTS.map(Color).to_vec(),
        [
            (ColorKey::WindowBackgroundWhite, Color(0xFF1C_1C1D)),
            (ColorKey::WindowBackgroundGray, Color(0xFF00_0000)),
            (ColorKey::WindowBackgroundWhiteBlackText, Color(0xFFFF_FFFF)),
            (ColorKey::WindowBackgroundWhiteGrayText, Color(0xFF80_8080)),
            (ColorKey::WindowBackgroundWhiteBlueText, Color(0xFF3E_88F7)),
            (ColorKey::ActionBarDefault, Color(0xFF1C_1C1D)),
            (ColorKey::ActionBarDefaultArchived, Color(0xFF1C_1C1D)),
            (ColorKey::ActionBarDefaultSubtitle, Color(0xFF8E_8E93)),
            (ColorKey::SwitchTrackChecked, Color(0xFF3E_88F7)),
            (ColorKey::CheckboxSquareBackground, Color(0xFF3E_88F7)),
            (ColorKey::DialogTextBlue, Color(0xFF3E_88F7)),
            (ColorKey::ChatsActionBackground, Color(0xFF3E_88F7)),
            (ColorKey::ChatWallpaper, Color(0xFF00_0000)),
            (ColorKey::ChatServiceBackground, Color(0x6626_2626)),
            (ColorKey::ChatInBubble, Color(0xFF26_2628)),
            (ColorKey::ChatInBubbleSelected, Color(0xFF3A_3A3C)),
            (ColorKey::ChatInBubbleShadow, Color(0x00000000)),
            (ColorKey::ChatMessageTextIn, Color(0xFFFF_FFFF)),
            (ColorKey::ChatMessageLinkIn, Color(0xFF5B_A7FF)),
            (ColorKey::ChatInTimeText, Color(0xFF8E_8E93)),
            (ColorKey::ChatInTimeSelectedText, Color(0xFF9A_9A9F)),
            (ColorKey::ChatInLoader, Color(0xFF3E_88F7)),
            (ColorKey::ChatOutBubble, Color(0xFF31_6FD0)),
            (ColorKey::ChatOutBubbleSelected, Color(0xFF2A_5FB5)),
            (ColorKey::ChatOutBubbleShadow, Color(0x00000000)),
            (ColorKey::ChatMessageTextOut, Color(0xFFFF_FFFF)),
            (ColorKey::ChatMessageLinkOut, Color(0xFFFF_FFFF)),
            (ColorKey::ChatOutTimeText, Color(0xFFB7_D1F7)),
            (ColorKey::ChatOutTimeSelectedText, Color(0xFFB7_D1F7)),
            (ColorKey::ChatOutLoader, Color(0xFFFF_FFFF)),
            (ColorKey::ChatOutAudioSeekbarFill, Color(0xFFFF_FFFF)),
            (ColorKey::ChatOutReplyLine, Color(0xFFFF_FFFF)),
            (ColorKey::ChatOutReplyNameText, Color(0xFFFF_FFFF)),
            (ColorKey::ChatOutSentCheck, Color(0xFFB7_D1F7)),
            (ColorKey::ChatOutInstant, Color(0xFFFF_FFFF)),
        ],
    )
}

/// Create the dim theme
pub fn dim_theme() -> ThemeRecord {
    ThemeRecord::new(
        ThemeName::Dim,
        true,
        Color(0xFF5B_A7E8),
        DARK_ACCENTS.map(Color).to_vec(),
        [
            (ColorKey::WindowBackgroundWhite, Color(0xFF1D_2733)),
            (ColorKey::WindowBackgroundGray, Color(0xFF15_1E27)),
            (ColorKey::WindowBackgroundWhiteBlackText, Color(0xFFF5_F5F5)),
            (ColorKey::WindowBackgroundWhiteGrayText, Color(0xFF7D_8B99)),
            (ColorKey::WindowBackgroundWhiteBlueText, Color(0xFF5B_A7E8)),
            (ColorKey::ActionBarDefault, Color(0xFF21_2D3B)),
            (ColorKey::ActionBarDefaultArchived, Color(0xFF21_2D3B)),
            (ColorKey::ActionBarDefaultSubtitle, Color(0xFF8B_9BAB)),
            (ColorKey::SwitchTrackChecked, Color(0xFF4E_9AD4)),
            (ColorKey::CheckboxSquareBackground, Color(0xFF4E_9AD4)),
            (ColorKey::DialogTextBlue, Color(0xFF5B_A7E8)),
            (ColorKey::ChatsActionBackground, Color(0xFF4E_9AD4)),
            (ColorKey::ChatWallpaper, Color(0xFF0E_1621)),
            (ColorKey::ChatServiceBackground, Color(0x661E_2C3A)),
            (ColorKey::ChatInBubble, Color(0xFF18_2533)),
            (ColorKey::ChatInBubbleSelected, Color(0xFF2B_3E52)),
            (ColorKey::ChatInBubbleShadow, Color(0xFF0A_1119)),
            (ColorKey::ChatMessageTextIn, Color(0xFFF5_F5F5)),
            (ColorKey::ChatMessageLinkIn, Color(0xFF71_BAFA)),
            (ColorKey::ChatInTimeText, Color(0xFF6D_7F8F)),
            (ColorKey::ChatInTimeSelectedText, Color(0xFF7E_94A8)),
            (ColorKey::ChatInLoader, Color(0xFF4E_9AD4)),
            (ColorKey::ChatOutBubble, Color(0xFF2B_5278)),
            (ColorKey::ChatOutBubbleSelected, Color(0xFF35_6491)),
            (ColorKey::ChatOutBubbleShadow, Color(0xFF0A_1119)),
            (ColorKey::ChatMessageTextOut, Color(0xFFF5_F5F5)),
            (ColorKey::ChatMessageLinkOut, Color(0xFF83_C6FF)),
            (ColorKey::ChatOutTimeText, Color(0xFF7D_A8D3)),
            (ColorKey::ChatOutTimeSelectedText, Color(0xFF8A_B5DE)),
            (ColorKey::ChatOutLoader, Color(0xFF5B_A7E8)),
            (ColorKey::ChatOutAudioSeekbarFill, Color(0xFF8A_C1F2)),
            (ColorKey::ChatOutReplyLine, Color(0xFF8A_C1F2)),
            (ColorKey::ChatOutReplyNameText, Color(0xFF8A_C1F2)),
            (ColorKey::ChatOutSentCheck, Color(0xFF72_ACE3)),
            (ColorKey::ChatOutInstant, Color(0xFF8A_C1F2)),
        ],
    )
}

/// Get a built-in theme by name
pub fn get_theme(name: ThemeName) -> ThemeRecord {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
        ThemeName::Dim => dim_theme(),
    }
}

/// Get all built-in themes as a map
pub fn all_themes() -> HashMap<ThemeName, ThemeRecord> {
    let mut themes = HashMap::new();
    themes.insert(ThemeName::Light, light_theme());
    themes.insert(ThemeName::Dark, dark_theme());
    themes.insert(ThemeName::Dim, dim_theme());
    themes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accent::perceived_brightness;

    // ==========================================================================
    // Theme Name Tests
    // ==========================================================================

    #[test]
    fn test_theme_name_display() {
        assert_eq!(ThemeName::Light.to_string(), "Light");
        assert_eq!(ThemeName::Dark.to_string(), "Dark");
        assert_eq!(ThemeName::Dim.to_string(), "Dim");
    }

    #[test]
    fn test_theme_name_serialization() {
        let json = serde_json::to_string(&ThemeName::Dark).unwrap();
        assert_eq!(json, "\"dark\"");

        let deserialized: ThemeName = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ThemeName::Dark);
    }

    // ==========================================================================
    // Theme Record Tests
    // ==========================================================================

    #[test]
    fn test_dark_flag_is_data() {
        assert!(!light_theme().is_dark);
        assert!(dark_theme().is_dark);
        assert!(dim_theme().is_dark);
    }

    #[test]
    fn test_light_theme_uses_registry_defaults() {
        let theme = light_theme();
        for key in ColorKey::ALL {
            assert_eq!(theme.defaults.get(*key), Some(key.default_color()));
        }
    }

    #[test]
    fn test_seeds_override_defaults() {
        let theme = dark_theme();
        assert_eq!(theme.defaults.get(ColorKey::ChatOutBubble), Some(Color(0xFF31_6FD0)));
        assert_eq!(theme.defaults.get(ColorKey::AvatarBackgroundRed), Some(Color(0xFFE5_6555)));
    }

    #[test]
    fn test_accent_presets() {
        let theme = light_theme();
        assert_eq!(theme.accent(0), Some(theme.accent_base));
        assert_eq!(theme.accents.len(), 8);
        assert!(theme.accent(99).is_none());
    }

    #[test]
    fn test_get_theme() {
        assert_eq!(get_theme(ThemeName::Light).name, ThemeName::Light);
        assert_eq!(get_theme(ThemeName::Dark).name, ThemeName::Dark);
        assert_eq!(get_theme(ThemeName::Dim).name, ThemeName::Dim);
    }

    #[test]
    fn test_all_themes() {
        let themes = all_themes();
        assert_eq!(themes.len(), 3);
        assert!(themes.contains_key(&ThemeName::Light));
        assert!(themes.contains_key(&ThemeName::Dark));
        assert!(themes.contains_key(&ThemeName::Dim));
    }

    // ==========================================================================
    // Accessibility Contrast Tests
    // ==========================================================================

    #[test]
    fn test_bubble_text_contrast() {
        for (name, theme) in all_themes() {
            for (fill, text) in [
                (ColorKey::ChatInBubble, ColorKey::ChatMessageTextIn),
                (ColorKey::ChatOutBubble, ColorKey::ChatMessageTextOut),
            ] {
                let fill = theme.defaults.get(fill).unwrap();
                let text = theme.defaults.get(text).unwrap();
                let diff = (perceived_brightness(fill) - perceived_brightness(text)).abs();
                assert!(diff > 0.4, "{:?} theme has insufficient bubble contrast: {}", name, diff);
            }
        }
    }
}
