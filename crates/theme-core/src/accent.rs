//! Accent recoloring in HSV space
//!
//! A theme is authored around one accent color. Picking another accent
//! rotates every color that belongs to the accent family by the hue delta
//! between the two accents, rescales its saturation and pulls its value,
//! then corrects the result so dark themes never get darker and light themes
//! never get lighter.

use crate::color::{Color, Hsv};

/// Colors further than this from the base accent hue are left alone
pub const HUE_GATE_DEGREES: f32 = 30.0;

/// Share of the transformed color kept by the brightness correction
pub const BRIGHTNESS_BLEND: f32 = 0.6;

/// Below this saturation a color is treated as neutral and keeps its hue
pub const NEUTRAL_SATURATION: f32 = 0.05;

/// Perceived-brightness threshold above which text on a fill should be dark
pub const DARK_TEXT_THRESHOLD: f32 = 0.705;

/// Squared RGB distance below which two gradient stops look alike
pub const NEAR_COLOR_DISTANCE: u32 = 35_000;

const EPSILON: f32 = 1e-4;

// =============================================================================
// Color Metrics
// =============================================================================

/// BT.709 luma of a color, in `[0, 1]`
pub fn perceived_brightness(color: Color) -> f32 {
    (0.2126 * color.red() as f32 + 0.7152 * color.green() as f32 + 0.0722 * color.blue() as f32)
        / 255.0
}

/// Squared Euclidean distance between two colors in RGB
pub fn color_distance(a: Color, b: Color) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = x as i32 - y as i32;
        (diff * diff) as u32
    };
    d(a.red(), b.red()) + d(a.green(), b.green()) + d(a.blue(), b.blue())
}

/// Channel-wise average of two colors
pub fn average_color(a: Color, b: Color) -> Color {
    let avg = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Color::from_argb(
        avg(a.alpha(), b.alpha()),
        avg(a.red(), b.red()),
        avg(a.green(), b.green()),
        avg(a.blue(), b.blue()),
    )
}

/// Whether text drawn over a fill of `color` should be dark
pub fn prefers_dark_text(color: Color) -> bool {
    perceived_brightness(color) > DARK_TEXT_THRESHOLD
}

// =============================================================================
// Transform
// =============================================================================

/// Recolors one accent family into another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentTransform {
    base: Hsv,
    target: Hsv,
    is_dark: bool,
}

impl AccentTransform {
    /// Transform from the theme's base accent to `target_accent`
    pub fn new(base_accent: Color, target_accent: Color, is_dark: bool) -> Self {
        Self::from_hsv(base_accent.to_hsv(), target_accent.to_hsv(), is_dark)
    }

    /// Transform between two HSV triples
    pub fn from_hsv(base: Hsv, target: Hsv, is_dark: bool) -> Self {
        Self { base, target, is_dark }
    }

    /// Base accent
    pub fn base(&self) -> Hsv {
        self.base
    }

    /// Target accent
    pub fn target(&self) -> Hsv {
        self.target
    }

    /// Whether the transform changes nothing
    pub fn is_identity(&self) -> bool {
        self.base == self.target
    }

    /// Recolor `color`
    pub fn apply(&self, color: Color) -> Color {
        transform(self.base, self.target, color, self.is_dark)
    }
}

/// Recolor `color` from the `base` accent family to the `target` one
pub fn transform(base: Hsv, target: Hsv, color: Color, is_dark: bool) -> Color {
    if base == target {
        return color;
    }
    match transform_uncorrected(base, target, color) {
        Some(remapped) => correct_brightness(color, remapped, is_dark),
        None => color,
    }
}

/// The HSV remap without the brightness correction
///
/// Returns `None` when `color` is outside the accent family.
pub fn transform_uncorrected(base: Hsv, target: Hsv, color: Color) -> Option<Color> {
    let hsv = color.to_hsv();
    if hsv.hue_distance(base) > HUE_GATE_DEGREES {
        return None;
    }

    let base_s = base.s.max(EPSILON);
    let base_v = base.v.max(EPSILON);
    let dist = (1.5 * hsv.s / base_s).min(1.0);

    let hue = if hsv.s < NEUTRAL_SATURATION {
        hsv.h
    } else {
        hsv.h + (target.h - base.h)
    };
    let remapped = Hsv::new(
        hue,
        hsv.s * target.s / base_s,
        hsv.v * (1.0 - dist + dist * target.v / base_v),
    );

    Some(Color::from_hsv(color.alpha(), remapped))
}

/// Pull `transformed` back toward the brightness of `original`
///
/// Applies only when the remap moved brightness the wrong way for the theme:
/// darker on a dark theme, lighter on a light one. The result keeps 60% of
/// the transformed color and mixes in 40% of a color with the original's
/// brightness.
pub fn correct_brightness(original: Color, transformed: Color, is_dark: bool) -> Color {
    let orig = perceived_brightness(original);
    let new = perceived_brightness(transformed);
    let violates = if is_dark { orig > new } else { orig < new };
    if !violates {
        return transformed;
    }

    let channels = [transformed.red(), transformed.green(), transformed.blue()].map(|c| c as f32);
    let fallback = luminance_matched(channels, orig, new);

    let [r, g, b] = [0, 1, 2].map(|i| {
        let mixed = BRIGHTNESS_BLEND * channels[i] + (1.0 - BRIGHTNESS_BLEND) * fallback[i];
        mixed.round().clamp(0.0, 255.0) as u8
    });
    Color::from_argb(transformed.alpha(), r, g, b)
}

/// `channels` rescaled to brightness `target`, or a gray of that brightness
/// when rescaling would clip or there is nothing to scale
fn luminance_matched(channels: [f32; 3], target: f32, current: f32) -> [f32; 3] {
    if current > EPSILON {
        let scale = target / current;
        let scaled = channels.map(|c| c * scale);
        if scaled.iter().all(|c| *c <= 255.0) {
            return scaled;
        }
    }
    [target * 255.0; 3]
}

/// The accent that would turn `base_color` into `desired` under [`transform`]
///
/// Used to derive an outgoing-message accent from a chosen bubble fill.
/// Returns `desired` itself when the inversion lands on a very dark accent.
pub fn accent_for(base: Hsv, base_color: Color, desired: Color) -> Color {
    let from = base_color.to_hsv();
    let to = desired.to_hsv();

    let base_s = base.s.max(EPSILON);
    let dist = (1.5 * from.s / base_s).min(1.0).max(EPSILON);

    let h = to.h - from.h + base.h;
    let s = to.s * base.s / from.s.max(EPSILON);
    let v = (to.v / from.v.max(EPSILON) + dist - 1.0) * base.v / dist;

    if v < 0.3 {
        return desired;
    }
    Color::from_hsv(0xFF, Hsv::new(h, s, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE_ACCENT: Color = Color(0xFF58_90C5);

    fn rotated(color: Color, degrees: f32) -> Hsv {
        let hsv = color.to_hsv();
        Hsv::new(hsv.h + degrees, hsv.s, hsv.v)
    }

    // ==========================================================================
    // Metric Tests
    // ==========================================================================

    #[test]
    fn test_perceived_brightness_extremes() {
        assert_eq!(perceived_brightness(Color::BLACK), 0.0);
        assert!((perceived_brightness(Color::WHITE) - 1.0).abs() < 1e-4);
        assert!(perceived_brightness(Color(0xFF00_FF00)) > perceived_brightness(Color(0xFFFF_0000)));
    }

    #[test]
    fn test_color_distance() {
        assert_eq!(color_distance(Color::BLACK, Color::BLACK), 0);
        assert_eq!(color_distance(Color(0xFF00_0000), Color(0xFF0A_0000)), 100);
        assert_eq!(color_distance(Color::BLACK, Color::WHITE), 3 * 255 * 255);
    }

    #[test]
    fn test_average_color() {
        assert_eq!(average_color(Color::BLACK, Color::WHITE), Color(0xFF7F_7F7F));
    }

    #[test]
    fn test_prefers_dark_text() {
        assert!(prefers_dark_text(Color(0xFFEF_FFDE)));
        assert!(!prefers_dark_text(Color(0xFF52_7DA3)));
    }

    // ==========================================================================
    // Transform Tests
    // ==========================================================================

    #[test]
    fn test_hue_gate_leaves_distant_colors() {
        let base = Hsv::new(200.0, 0.6, 0.8);
        let target = Hsv::new(300.0, 0.6, 0.8);
        for hue in [160.0, 240.0] {
            let color = Color::from_hsv(0xFF, Hsv::new(hue, 0.7, 0.7));
            assert_eq!(transform(base, target, color, false), color, "hue {}", hue);
            assert_eq!(transform(base, target, color, true), color, "hue {}", hue);
        }
    }

    #[test]
    fn test_identity_on_base() {
        let base = BASE_ACCENT.to_hsv();
        assert_eq!(transform(base, base, BASE_ACCENT, false), BASE_ACCENT);
        assert_eq!(transform(base, base, BASE_ACCENT, true), BASE_ACCENT);
        assert!(AccentTransform::new(BASE_ACCENT, BASE_ACCENT, false).is_identity());
    }

    #[test]
    fn test_base_accent_maps_to_target() {
        let base = BASE_ACCENT.to_hsv();
        let target_color = Color(0xFFC5_5890);
        let result = transform(base, target_color.to_hsv(), BASE_ACCENT, false);
        let result_hsv = result.to_hsv();
        assert!(result_hsv.hue_distance(target_color.to_hsv()) < 2.0);
    }

    #[test]
    fn test_preserves_alpha() {
        let base = BASE_ACCENT.to_hsv();
        let color = BASE_ACCENT.with_alpha(0x40);
        let result = transform(base, rotated(BASE_ACCENT, 40.0), color, false);
        assert_eq!(result.alpha(), 0x40);
        assert_ne!(result, color);
    }

    #[test]
    fn test_neutral_gray_keeps_hue() {
        let base = BASE_ACCENT.to_hsv();
        let gray = Color(0xFFA0_A3A6);
        let gray_hsv = gray.to_hsv();
        assert!(gray_hsv.s < NEUTRAL_SATURATION);
        assert!(gray_hsv.hue_distance(base) <= HUE_GATE_DEGREES);

        let result = transform(base, rotated(BASE_ACCENT, 40.0), gray, false);
        assert!(result.to_hsv().hue_distance(gray_hsv) <= 2.0);
    }

    #[test]
    fn test_degenerate_base_does_not_panic() {
        let base = Hsv::new(0.0, 0.0, 0.0);
        let target = Hsv::new(120.0, 1.0, 1.0);
        let result = transform(base, target, Color(0xFFFF_0000), true);
        assert_eq!(result.alpha(), 0xFF);
    }

    // ==========================================================================
    // Brightness Correction Tests
    // ==========================================================================

    #[test]
    fn test_correction_noop_when_direction_ok() {
        let original = Color(0xFF40_4040);
        let lighter = Color(0xFF60_6060);
        assert_eq!(correct_brightness(original, lighter, true), lighter);
        assert_eq!(correct_brightness(lighter, original, false), original);
    }

    #[test]
    fn test_correction_lifts_dark_theme_color() {
        let original = Color(0xFF80_A0C0);
        let darker = Color(0xFF20_3040);
        let corrected = correct_brightness(original, darker, true);
        let b = perceived_brightness(corrected);
        assert!(b > perceived_brightness(darker));
        assert!(b < perceived_brightness(original));
    }

    #[test]
    fn test_correction_handles_black() {
        let corrected = correct_brightness(Color(0xFF80_8080), Color::BLACK, true);
        assert!(perceived_brightness(corrected) > 0.0);
    }

    #[test]
    fn test_correction_handles_clipping() {
        // Pure blue cannot be rescaled upward without clipping
        let corrected = correct_brightness(Color(0xFFA0_A0FF), Color(0xFF00_00FF), true);
        assert!(perceived_brightness(corrected) > perceived_brightness(Color(0xFF00_00FF)));
    }

    #[test]
    fn test_correction_darkens_light_theme_color() {
        let original = Color(0xFF20_3040);
        let lighter = Color(0xFFC0_D0E0);
        let corrected = correct_brightness(original, lighter, false);
        assert!(perceived_brightness(corrected) < perceived_brightness(lighter));
    }

    fn violation(original: Color, candidate: Color, is_dark: bool) -> f32 {
        let (o, c) = (perceived_brightness(original), perceived_brightness(candidate));
        if is_dark { (o - c).max(0.0) } else { (c - o).max(0.0) }
    }

    proptest! {
        #[test]
        fn prop_correction_reduces_violation(
            argb in 0xFF00_0000u32..=0xFFFF_FFFF,
            base_hue in 0.0f32..360.0,
            target_hue in 0.0f32..360.0,
            target_s in 0.05f32..1.0,
            target_v in 0.05f32..1.0,
            is_dark in any::<bool>(),
        ) {
            let color = Color(argb);
            let base = Hsv::new(base_hue, 0.6, 0.8);
            let target = Hsv::new(target_hue, target_s, target_v);

            if let Some(raw) = transform_uncorrected(base, target, color) {
                let corrected = correct_brightness(color, raw, is_dark);
                let before = violation(color, raw, is_dark);
                let after = violation(color, corrected, is_dark);
                // Per-channel rounding moves luma by at most 0.5 / 255
                prop_assert!(after <= before + 0.002);
                if before > 0.01 {
                    prop_assert!(after < before);
                }
            }
        }
    }

    // ==========================================================================
    // Inversion Tests
    // ==========================================================================

    #[test]
    fn test_accent_for_round_trip() {
        let base = BASE_ACCENT.to_hsv();
        let base_fill = Color(0xFF9E_C4E8);
        let desired = Color(0xFFB8_9EE8);

        let accent = accent_for(base, base_fill, desired);
        let reproduced = transform(base, accent.to_hsv(), base_fill, false);
        assert!(color_distance(reproduced, desired) < 600, "{:?} vs {:?}", reproduced, desired);
    }

    #[test]
    fn test_accent_for_dark_result_falls_back() {
        let base = BASE_ACCENT.to_hsv();
        let desired = Color(0xFF05_0505);
        assert_eq!(accent_for(base, Color(0xFFEF_FFDE), desired), desired);
    }
}
