//! Accent profiles
//!
//! An [`AccentProfile`] is the full set of overrides produced for one accent
//! selection on one theme. Derivation runs in four passes, in this order:
//!
//! 1. recolor every non-excluded key from the theme accent to the chosen one
//! 2. recolor outgoing-message keys with the outgoing accent, write custom
//!    bubble fills and pick dark or light text for gradient bubbles
//! 3. decide whether the outgoing gradient is visually near-uniform
//! 4. apply background overrides, which always win
//!
//! Derivation is deterministic: keys are visited in registry order and no
//! pass depends on time or randomness.

use crate::accent::{
    accent_for, average_color, color_distance, perceived_brightness, AccentTransform,
    DARK_TEXT_THRESHOLD, NEAR_COLOR_DISTANCE,
};
use crate::color::Color;
use crate::keys::{ColorKey, KeyGroup};
use crate::overlay::ResolvedOverlay;
use crate::theme::ThemeRecord;
use serde::{Deserialize, Serialize};

/// Text color on light gradient bubbles
pub const DARK_TEXT: Color = Color(0xFF21_2121);
/// Secondary text color on light gradient bubbles
pub const DARK_SUBTEXT: Color = Color(0xFF55_5555);
/// Seekbar color on light gradient bubbles
pub const DARK_SEEKBAR: Color = Color(0x4D00_0000);
/// Text color on dark gradient bubbles
pub const LIGHT_TEXT: Color = Color(0xFFFF_FFFF);
/// Secondary text color on dark gradient bubbles
pub const LIGHT_SUBTEXT: Color = Color(0xFFEF_F0F2);
/// Seekbar color on dark gradient bubbles
pub const LIGHT_SEEKBAR: Color = Color(0x4DFF_FFFF);

const TEXT_KEYS: [ColorKey; 5] = [
    ColorKey::ChatMessageTextOut,
    ColorKey::ChatMessageLinkOut,
    ColorKey::ChatOutReplyNameText,
    ColorKey::ChatOutInstant,
    ColorKey::ChatOutSentCheck,
];

const SUBTEXT_KEYS: [ColorKey; 3] = [
    ColorKey::ChatOutTimeText,
    ColorKey::ChatOutTimeSelectedText,
    ColorKey::ChatOutReplyLine,
];

const OUT_GRADIENT_KEYS: [ColorKey; 3] = [
    ColorKey::ChatOutBubbleGradient1,
    ColorKey::ChatOutBubbleGradient2,
    ColorKey::ChatOutBubbleGradient3,
];

const WALLPAPER_GRADIENT_KEYS: [ColorKey; 3] = [
    ColorKey::ChatWallpaperGradientTo1,
    ColorKey::ChatWallpaperGradientTo2,
    ColorKey::ChatWallpaperGradientTo3,
];

// =============================================================================
// Selection Inputs
// =============================================================================

/// Up to three gradient stops, normalized to priority order
///
/// A stop only counts when every stop before it is present and non-zero, so
/// a second stop without a first is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Option<Color>; 3]")]
pub struct GradientStops([Option<Color>; 3]);

impl From<[Option<Color>; 3]> for GradientStops {
    fn from(raw: [Option<Color>; 3]) -> Self {
        Self::new(raw)
    }
}

impl GradientStops {
    /// No stops
    pub const NONE: GradientStops = GradientStops([None; 3]);

    /// Normalize raw, possibly inconsistent stops
    pub fn new(raw: [Option<Color>; 3]) -> Self {
        let mut stops = [None; 3];
        for (slot, stop) in stops.iter_mut().zip(raw) {
            match stop.filter(|c| !c.is_zero()) {
                Some(color) => *slot = Some(color),
                None => break,
            }
        }
        Self(stops)
    }

    /// Build from zero-for-absent colors
    pub fn from_colors(colors: [Color; 3]) -> Self {
        Self::new(colors.map(Some))
    }

    /// Number of effective stops
    pub fn len(&self) -> usize {
        self.0.iter().take_while(|s| s.is_some()).count()
    }

    /// Whether there are no stops
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Effective stops, first to last
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().map_while(|s| *s)
    }

    /// Stop `i`, zero when absent
    pub fn get_or_zero(&self, i: usize) -> Color {
        self.0.get(i).copied().flatten().unwrap_or(Color::TRANSPARENT)
    }
}

/// Custom outgoing bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingBubbleColors {
    /// Bubble fill
    pub fill: Color,
    /// Gradient stops drawn above the fill
    #[serde(default)]
    pub gradient: GradientStops,
    /// Whether a 2+ stop gradient animates
    #[serde(default)]
    pub animated: bool,
}

/// Wallpaper overrides applied after everything else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundOverride {
    /// Wallpaper base color
    #[serde(default)]
    pub color: Option<Color>,
    /// Wallpaper gradient stops
    #[serde(default)]
    pub gradient: GradientStops,
    /// Gradient rotation in degrees
    #[serde(default)]
    pub rotation: Option<u16>,
}

impl BackgroundOverride {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.gradient.is_empty() && self.rotation.is_none()
    }
}

/// Everything the user picked for one accent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccentSelection {
    /// Primary accent
    pub accent: Color,
    /// Secondary accent, used for outgoing messages when no custom fill is set
    #[serde(default)]
    pub secondary_accent: Option<Color>,
    /// Custom outgoing bubble colors
    #[serde(default)]
    pub outgoing: Option<OutgoingBubbleColors>,
    /// Wallpaper overrides
    #[serde(default)]
    pub background: Option<BackgroundOverride>,
}

impl AccentSelection {
    /// Select only a primary accent
    pub fn new(accent: Color) -> Self {
        Self { accent, secondary_accent: None, outgoing: None, background: None }
    }

    /// The theme's own accent, producing no overrides
    pub fn theme_default(theme: &ThemeRecord) -> Self {
        Self::new(theme.accent_base)
    }

    /// Set the secondary accent
    pub fn with_secondary(mut self, accent: Color) -> Self {
        self.secondary_accent = Some(accent);
        self
    }

    /// Set custom outgoing bubble colors
    pub fn with_outgoing(mut self, outgoing: OutgoingBubbleColors) -> Self {
        self.outgoing = Some(outgoing);
        self
    }

    /// Set wallpaper overrides
    pub fn with_background(mut self, background: BackgroundOverride) -> Self {
        self.background = Some(background);
        self
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Overrides derived for one accent selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccentProfile {
    /// Resolved overrides
    pub overlay: ResolvedOverlay,
    /// Whether icons over outgoing gradients need their own gradient tint
    pub draw_gradient_icons: bool,
}

impl AccentProfile {
    /// Derive the overrides for `selection` on `theme`
    pub fn derive(theme: &ThemeRecord, selection: &AccentSelection) -> Self {
        let defaults = &theme.defaults;
        let base_hsv = theme.accent_base.to_hsv();
        let mut overlay = ResolvedOverlay::new();

        // Pass 1: primary accent
        if selection.accent != theme.accent_base || selection.secondary_accent.is_some() {
            let transform = AccentTransform::new(theme.accent_base, selection.accent, theme.is_dark);
            for key in ColorKey::ALL {
                if key.group().is_accent_excluded() {
                    continue;
                }
                let Some(color) = defaults.get(*key) else { continue };
                let recolored = transform.apply(color);
                if recolored != color {
                    overlay.insert(*key, recolored);
                }
            }
        }

        // Pass 2: outgoing accent
        let outgoing_accent = match (&selection.outgoing, selection.secondary_accent) {
            (Some(out), _) => defaults
                .get(ColorKey::ChatOutBubble)
                .map(|base_fill| accent_for(base_hsv, base_fill, out.fill)),
            (None, Some(secondary)) => Some(secondary),
            (None, None) => None,
        };

        if let Some(out_accent) = outgoing_accent.filter(|a| *a != selection.accent) {
            let transform = AccentTransform::new(theme.accent_base, out_accent, theme.is_dark);
            for key in ColorKey::ALL.iter().filter(|k| k.group() == KeyGroup::MyMessages) {
                let Some(color) = defaults.get(*key) else { continue };
                let recolored = transform.apply(color);
                if recolored != color {
                    overlay.insert(*key, recolored);
                } else {
                    overlay.remove(*key);
                }
            }
        }

        let mut draw_gradient_icons = false;
        if let Some(out) = &selection.outgoing {
            apply_outgoing_colors(&mut overlay, out);

            // Pass 3: near-uniform gradients need no separate icon tint
            if !out.gradient.is_empty() {
                let stops: Vec<Color> = std::iter::once(out.fill).chain(out.gradient.iter()).collect();
                draw_gradient_icons = !all_near(&stops);
            }
        }

        // Pass 4: background overrides
        if let Some(background) = selection.background.filter(|b| !b.is_empty()) {
            apply_background(&mut overlay, &background);
        }

        tracing::debug!(
            "Derived accent profile for {} theme: {} overrides, gradient icons: {}",
            theme.name,
            overlay.len(),
            draw_gradient_icons
        );

        Self { overlay, draw_gradient_icons }
    }
}

fn apply_outgoing_colors(overlay: &mut ResolvedOverlay, out: &OutgoingBubbleColors) {
    overlay.insert(ColorKey::ChatOutBubble, out.fill);
    for (i, key) in OUT_GRADIENT_KEYS.iter().enumerate() {
        overlay.insert(*key, out.gradient.get_or_zero(i));
    }
    let animated = out.animated && out.gradient.len() >= 2;
    overlay.insert(ColorKey::ChatOutBubbleGradientAnimated, Color(animated as u32));

    if out.gradient.is_empty() {
        return;
    }

    let blended = out.gradient.iter().fold(out.fill, average_color);
    let (text, subtext, seekbar) = if perceived_brightness(blended) > DARK_TEXT_THRESHOLD {
        (DARK_TEXT, DARK_SUBTEXT, DARK_SEEKBAR)
    } else {
        (LIGHT_TEXT, LIGHT_SUBTEXT, LIGHT_SEEKBAR)
    };
    for key in TEXT_KEYS {
        overlay.insert(key, text);
    }
    for key in SUBTEXT_KEYS {
        overlay.insert(key, subtext);
    }
    overlay.insert(ColorKey::ChatOutAudioSeekbarFill, seekbar);
}

fn apply_background(overlay: &mut ResolvedOverlay, background: &BackgroundOverride) {
    if let Some(color) = background.color {
        overlay.insert(ColorKey::ChatWallpaper, color);
    }
    if background.color.is_some() || !background.gradient.is_empty() {
        for (i, key) in WALLPAPER_GRADIENT_KEYS.iter().enumerate() {
            overlay.insert(*key, background.gradient.get_or_zero(i));
        }
    }
    if let Some(rotation) = background.rotation {
        overlay.insert(ColorKey::ChatWallpaperGradientRotation, Color((rotation % 360) as u32));
    }
}

fn all_near(stops: &[Color]) -> bool {
    stops.len() >= 2
        && stops
            .iter()
            .enumerate()
            .all(|(i, a)| stops[i + 1..].iter().all(|b| color_distance(*a, *b) <= NEAR_COLOR_DISTANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{dark_theme, light_theme};

    // ==========================================================================
    // Gradient Stop Tests
    // ==========================================================================

    #[test]
    fn test_gradient_stops_priority() {
        let stops = GradientStops::new([None, Some(Color(0xFF11_1111)), Some(Color(0xFF22_2222))]);
        assert!(stops.is_empty());

        let stops = GradientStops::new([Some(Color(0xFF11_1111)), None, Some(Color(0xFF22_2222))]);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops.get_or_zero(2), Color::TRANSPARENT);
    }

    #[test]
    fn test_gradient_stops_zero_is_absent() {
        let stops = GradientStops::from_colors([Color(0xFF11_1111), Color(0), Color(0xFF22_2222)]);
        assert_eq!(stops.iter().collect::<Vec<_>>(), vec![Color(0xFF11_1111)]);
    }

    #[test]
    fn test_gradient_stops_normalized_when_loaded() {
        let stops: GradientStops = serde_json::from_str("[0,4283409376,4289748694]").unwrap();
        assert!(stops.is_empty());
        let stops: GradientStops = serde_json::from_str("[null,4283409376,4289748694]").unwrap();
        assert!(stops.is_empty());

        let stops: GradientStops = serde_json::from_str("[4283409376,null,4289748694]").unwrap();
        assert_eq!(stops.len(), 1);
        let json = serde_json::to_string(&stops).unwrap();
        assert_eq!(json, "[4283409376,null,null]");
    }

    #[test]
    fn test_loaded_leading_zero_stop_draws_no_gradient() {
        let theme = light_theme();
        let out: OutgoingBubbleColors = serde_json::from_str(
            r#"{"fill":4286104178,"gradient":[0,4283409376,4289748694],"animated":true}"#,
        )
        .unwrap();
        let profile = AccentProfile::derive(&theme, &AccentSelection::new(theme.accent_base).with_outgoing(out));
        let overlay = &profile.overlay;

        for key in OUT_GRADIENT_KEYS {
            assert_eq!(overlay.get(key), Some(Color::TRANSPARENT));
        }
        assert_eq!(overlay.get(ColorKey::ChatOutBubbleGradientAnimated), Some(Color(0)));
        assert!(!profile.draw_gradient_icons);
    }

    // ==========================================================================
    // Derivation Tests
    // ==========================================================================

    #[test]
    fn test_theme_accent_produces_no_overrides() {
        let theme = light_theme();
        let profile = AccentProfile::derive(&theme, &AccentSelection::theme_default(&theme));
        assert!(profile.overlay.is_empty());
        assert!(!profile.draw_gradient_icons);
    }

    #[test]
    fn test_accent_recolors_accent_family() {
        let theme = light_theme();
        let purple = theme.accent(1).unwrap();
        let profile = AccentProfile::derive(&theme, &AccentSelection::new(purple));

        let action_bar = profile.overlay.get(ColorKey::ActionBarDefault).unwrap();
        assert_ne!(action_bar, ColorKey::ActionBarDefault.default_color());
        assert!(action_bar.to_hsv().hue_distance(purple.to_hsv()) < 30.0);
    }

    #[test]
    fn test_excluded_groups_untouched() {
        let theme = light_theme();
        let profile = AccentProfile::derive(&theme, &AccentSelection::new(theme.accent(1).unwrap()));
        for key in ColorKey::ALL.iter().filter(|k| k.group().is_accent_excluded()) {
            assert!(profile.overlay.get(*key).is_none(), "{} was recolored", key);
        }
    }

    #[test]
    fn test_distant_hues_untouched() {
        let theme = light_theme();
        let profile = AccentProfile::derive(&theme, &AccentSelection::new(theme.accent(1).unwrap()));
        // Green unread counter is far from the blue base accent
        assert!(profile.overlay.get(ColorKey::ChatsUnreadCounter).is_none());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let theme = dark_theme();
        let selection = AccentSelection::new(theme.accent(3).unwrap()).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFF78_C272),
            gradient: GradientStops::from_colors([Color(0xFF4F_A3E0), Color(0xFFB0_5ED6), Color(0)]),
            animated: true,
        });
        assert_eq!(AccentProfile::derive(&theme, &selection), AccentProfile::derive(&theme, &selection));
    }

    #[test]
    fn test_secondary_accent_recolors_my_messages() {
        let theme = dark_theme();
        let accent = theme.accent_base;
        let secondary = theme.accent(1).unwrap();
        let profile = AccentProfile::derive(&theme, &AccentSelection::new(accent).with_secondary(secondary));

        let fill = profile.overlay.get(ColorKey::ChatOutBubble).unwrap();
        assert!(fill.to_hsv().hue_distance(secondary.to_hsv()) < 30.0);
        // Primary accent is the theme's own, so general keys stay put
        assert!(profile.overlay.get(ColorKey::ActionBarDefault).is_none());
    }

    #[test]
    fn test_outgoing_colors_written() {
        let theme = light_theme();
        let selection = AccentSelection::new(theme.accent_base).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFF78_C272),
            gradient: GradientStops::from_colors([Color(0xFF4F_A3E0), Color(0xFFB0_5ED6), Color(0)]),
            animated: true,
        });
        let profile = AccentProfile::derive(&theme, &selection);
        let overlay = &profile.overlay;

        assert_eq!(overlay.get(ColorKey::ChatOutBubble), Some(Color(0xFF78_C272)));
        assert_eq!(overlay.get(ColorKey::ChatOutBubbleGradient1), Some(Color(0xFF4F_A3E0)));
        assert_eq!(overlay.get(ColorKey::ChatOutBubbleGradient2), Some(Color(0xFFB0_5ED6)));
        assert_eq!(overlay.get(ColorKey::ChatOutBubbleGradient3), Some(Color::TRANSPARENT));
        assert_eq!(overlay.get(ColorKey::ChatOutBubbleGradientAnimated), Some(Color(1)));
        assert!(profile.draw_gradient_icons);
    }

    #[test]
    fn test_single_stop_never_animates() {
        let theme = light_theme();
        let selection = AccentSelection::new(theme.accent_base).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFF78_C272),
            gradient: GradientStops::from_colors([Color(0xFF4F_A3E0), Color(0), Color(0)]),
            animated: true,
        });
        let profile = AccentProfile::derive(&theme, &selection);
        assert_eq!(profile.overlay.get(ColorKey::ChatOutBubbleGradientAnimated), Some(Color(0)));
    }

    #[test]
    fn test_readable_text_on_light_gradient() {
        let theme = dark_theme();
        let selection = AccentSelection::new(theme.accent_base).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFFF4_F9E8),
            gradient: GradientStops::from_colors([Color(0xFFE8_F7D9), Color(0xFFF9_F3D2), Color(0)]),
            animated: false,
        });
        let profile = AccentProfile::derive(&theme, &selection);
        assert_eq!(profile.overlay.get(ColorKey::ChatMessageTextOut), Some(DARK_TEXT));
        assert_eq!(profile.overlay.get(ColorKey::ChatOutTimeText), Some(DARK_SUBTEXT));
        assert_eq!(profile.overlay.get(ColorKey::ChatOutAudioSeekbarFill), Some(DARK_SEEKBAR));
    }

    #[test]
    fn test_readable_text_on_dark_gradient() {
        let theme = light_theme();
        let selection = AccentSelection::new(theme.accent_base).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFF2B_5278),
            gradient: GradientStops::from_colors([Color(0xFF4A_2C7F), Color(0), Color(0)]),
            animated: false,
        });
        let profile = AccentProfile::derive(&theme, &selection);
        assert_eq!(profile.overlay.get(ColorKey::ChatMessageTextOut), Some(LIGHT_TEXT));
        assert_eq!(profile.overlay.get(ColorKey::ChatOutReplyLine), Some(LIGHT_SUBTEXT));
    }

    #[test]
    fn test_near_uniform_gradient_skips_icon_pass() {
        let theme = light_theme();
        let selection = AccentSelection::new(theme.accent_base).with_outgoing(OutgoingBubbleColors {
            fill: Color(0xFF78_C272),
            gradient: GradientStops::from_colors([Color(0xFF7C_C476), Color(0xFF74_BE6E), Color(0)]),
            animated: false,
        });
        let profile = AccentProfile::derive(&theme, &selection);
        assert!(!profile.draw_gradient_icons);
    }

    #[test]
    fn test_background_override_wins() {
        let theme = light_theme();
        let selection = AccentSelection::new(theme.accent(2).unwrap()).with_background(BackgroundOverride {
            color: Some(Color(0xFF12_3456)),
            gradient: GradientStops::new([Some(Color(0xFF65_4321)), None, Some(Color(0xFFAB_CDEF))]),
            rotation: Some(405),
        });
        let profile = AccentProfile::derive(&theme, &selection);
        let overlay = &profile.overlay;

        assert_eq!(overlay.get(ColorKey::ChatWallpaper), Some(Color(0xFF12_3456)));
        assert_eq!(overlay.get(ColorKey::ChatWallpaperGradientTo1), Some(Color(0xFF65_4321)));
        assert_eq!(overlay.get(ColorKey::ChatWallpaperGradientTo2), Some(Color::TRANSPARENT));
        assert_eq!(overlay.get(ColorKey::ChatWallpaperGradientTo3), Some(Color::TRANSPARENT));
        assert_eq!(overlay.get(ColorKey::ChatWallpaperGradientRotation), Some(Color(45)));
    }

    #[test]
    fn test_selection_serialization() {
        let selection = AccentSelection::new(Color(0xFF58_90C5)).with_secondary(Color(0xFF7E_5FE5));
        let json = serde_json::to_string(&selection).unwrap();
        let deserialized: AccentSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, selection);

        let minimal: AccentSelection = serde_json::from_str(r#"{"accent":4283994309}"#).unwrap();
        assert_eq!(minimal, AccentSelection::new(Color(0xFF58_90C5)));
    }
}
