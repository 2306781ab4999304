//! Colors Module
//! Resolves named or explicit palettes into concrete colors.

use crate::error::{ChartError, Result};
use palette::{Hsl, Hsluv, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ChartError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn from_srgb(rgb: Srgb) -> Self {
        let rgb: Srgb<u8> = rgb.into_format();
        Self::rgb(rgb.red, rgb.green, rgb.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// What happens when a fixed palette has fewer colors than categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteWrap {
    /// Reuse colors from the start of the palette.
    #[default]
    Cycle,
    /// Fail with `PaletteExhausted`.
    Strict,
}

/// A palette request: a palette name or an explicit list of hex colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSpec {
    Named(String),
    Colors(Vec<String>),
}

impl Default for PaletteSpec {
    fn default() -> Self {
        PaletteSpec::Named("husl".to_string())
    }
}

impl From<&str> for PaletteSpec {
    fn from(name: &str) -> Self {
        PaletteSpec::Named(name.to_string())
    }
}

/// Names accepted by [`PaletteSpec::Named`].
pub const PALETTE_NAMES: [&str; 9] = [
    "husl",
    "hls",
    "deep",
    "muted",
    "pastel",
    "bright",
    "dark",
    "colorblind",
    "tab10",
];

const DEEP: [&str; 10] = [
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];
const MUTED: [&str; 10] = [
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];
const PASTEL: [&str; 10] = [
    "#A1C9F4", "#FFB482", "#8DE5A1", "#FF9F9B", "#D0BBFF", "#DEBB9B", "#FAB0E4", "#CFCFCF",
    "#FFFEA3", "#B9F2F0",
];
const BRIGHT: [&str; 10] = [
    "#023EFF", "#FF7C00", "#1AC938", "#E8000B", "#8B2BE2", "#9F4800", "#F14CC1", "#A3A3A3",
    "#FFC400", "#00D7FF",
];
const DARK: [&str; 10] = [
    "#001C7F", "#B1400D", "#12711C", "#8C0800", "#591E71", "#592F0D", "#A23582", "#3C3C3C",
    "#B8850A", "#006374",
];
const COLORBLIND: [&str; 10] = [
    "#0173B2", "#DE8F05", "#029E73", "#D55E00", "#CC78BC", "#CA9161", "#FBAFE4", "#949494",
    "#ECE133", "#56B4E9",
];
const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Hue offset shared by the generated palettes.
const HUE_OFFSET: f32 = 0.01;

/// Evenly spaced hues in [0, 1), shifted by the hue offset.
fn hues(n: usize) -> impl Iterator<Item = f32> {
    (0..n).map(move |i| (i as f32 / n as f32 + HUE_OFFSET) % 1.0)
}

/// `n` colors evenly spaced in HSLuv hue (s = 0.9, l = 0.65).
pub fn husl_palette(n: usize) -> Vec<Color> {
    hues(n)
        .map(|h| {
            let hsluv: Hsluv = Hsluv::new(h * 359.0, 0.9 * 99.0, 0.65 * 99.0);
            let rgb: Srgb = hsluv.into_color();
            Color::from_srgb(rgb)
        })
        .collect()
}

/// `n` colors evenly spaced in HSL hue (l = 0.6, s = 0.65).
pub fn hls_palette(n: usize) -> Vec<Color> {
    hues(n)
        .map(|h| {
            let hsl = Hsl::new(h * 360.0, 0.65, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color::from_srgb(rgb)
        })
        .collect()
}

fn fixed(list: &[&str]) -> Vec<Color> {
    list.iter().filter_map(|hex| Color::from_hex(hex).ok()).collect()
}

impl PaletteSpec {
    /// Resolve to exactly `n` colors.
    ///
    /// Generated palettes yield `n` distinct hues. Fixed and explicit palettes
    /// are applied in order and follow `wrap` when shorter than `n`.
    pub fn resolve(&self, n: usize, wrap: PaletteWrap) -> Result<Vec<Color>> {
        let base = match self {
            PaletteSpec::Named(name) => match name.to_ascii_lowercase().as_str() {
                "husl" => return Ok(husl_palette(n)),
                "hls" => return Ok(hls_palette(n)),
                "deep" => fixed(&DEEP),
                "muted" => fixed(&MUTED),
                "pastel" => fixed(&PASTEL),
                "bright" => fixed(&BRIGHT),
                "dark" => fixed(&DARK),
                "colorblind" => fixed(&COLORBLIND),
                "tab10" => fixed(&TAB10),
                _ => return Err(ChartError::UnknownPalette(name.clone())),
            },
            PaletteSpec::Colors(list) => {
                if list.is_empty() {
                    return Err(ChartError::UnknownPalette("empty color list".to_string()));
                }
                list.iter()
                    .map(|hex| Color::from_hex(hex))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        if n > base.len() && wrap == PaletteWrap::Strict {
            return Err(ChartError::PaletteExhausted {
                needed: n,
                available: base.len(),
            });
        }

        Ok(base.iter().cycle().take(n).copied().collect())
    }

    /// Check the palette resolves without needing a color count.
    pub fn validate(&self) -> Result<()> {
        self.resolve(0, PaletteWrap::Cycle).map(|_| ())
    }
}

impl fmt::Display for PaletteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteSpec::Named(name) => write!(f, "{}", name),
            PaletteSpec::Colors(list) => write!(f, "[{}]", list.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#4C72B0").unwrap();
        assert_eq!(c, Color::rgb(0x4c, 0x72, 0xb0));
        assert_eq!(c.to_string(), "#4c72b0");
        assert_eq!(Color::from_hex("ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(ChartError::InvalidColor(_))
        ));
        assert!(Color::from_hex("#gg0000").is_err());
    }

    #[test]
    fn test_husl_gives_n_distinct_colors() {
        for n in [1, 2, 5, 12] {
            let colors = PaletteSpec::default().resolve(n, PaletteWrap::Strict).unwrap();
            assert_eq!(colors.len(), n);
            let unique: std::collections::HashSet<_> = colors.iter().collect();
            assert_eq!(unique.len(), n);
        }
    }

    #[test]
    fn test_hls_first_hue_is_red() {
        let colors = hls_palette(3);
        assert!(colors[0].r > colors[0].g && colors[0].r > colors[0].b);
    }

    #[test]
    fn test_fixed_palette_cycles() {
        let colors = PaletteSpec::from("deep").resolve(12, PaletteWrap::Cycle).unwrap();
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[10], colors[0]);
        assert_eq!(colors[11], colors[1]);
    }

    #[test]
    fn test_strict_wrap_fails_when_short() {
        let err = PaletteSpec::from("tab10")
            .resolve(11, PaletteWrap::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::PaletteExhausted {
                needed: 11,
                available: 10
            }
        ));
    }

    #[test]
    fn test_names_case_insensitive() {
        assert!(PaletteSpec::from("Deep").validate().is_ok());
        assert!(PaletteSpec::from("HUSL").validate().is_ok());
        for name in PALETTE_NAMES {
            assert!(PaletteSpec::from(name).validate().is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_unknown_palette() {
        assert!(matches!(
            PaletteSpec::from("rainbow").validate(),
            Err(ChartError::UnknownPalette(name)) if name == "rainbow"
        ));
        assert!(matches!(
            PaletteSpec::Colors(vec![]).validate(),
            Err(ChartError::UnknownPalette(_))
        ));
    }

    #[test]
    fn test_explicit_colors() {
        let spec = PaletteSpec::Colors(vec!["#000000".into(), "#ffffff".into()]);
        let colors = spec.resolve(3, PaletteWrap::Cycle).unwrap();
        assert_eq!(
            colors,
            vec![Color::rgb(0, 0, 0), Color::rgb(255, 255, 255), Color::rgb(0, 0, 0)]
        );
        let bad = PaletteSpec::Colors(vec!["navy".into()]);
        assert!(matches!(bad.validate(), Err(ChartError::InvalidColor(_))));
    }

    #[test]
    fn test_spec_from_json() {
        let named: PaletteSpec = serde_json::from_str(r#""pastel""#).unwrap();
        assert_eq!(named, PaletteSpec::from("pastel"));
        let list: PaletteSpec = serde_json::from_str(r##"["#010203"]"##).unwrap();
        assert_eq!(list, PaletteSpec::Colors(vec!["#010203".into()]));
    }
}
