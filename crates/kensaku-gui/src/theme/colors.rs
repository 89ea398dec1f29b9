//! Semantic color tokens, deserialized from TOML theme files.

use iced::Color;
use serde::Deserialize;

// ── Hex color serde ─────────────────────────────────────────────────

mod hex_color {
    use iced::Color;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_hex_color(s: &str) -> Result<Color, String> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(format!("invalid hex color: {s}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        match hex.len() {
            6 => Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::from_rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)? as f32 / 255.0,
            )),
            _ => Err(format!("invalid hex color: {s}")),
        }
    }
}

// ── TOML intermediate structs ──────────────────────────────────────

/// Raw TOML theme file: one theme, both appearance variants.
#[derive(Debug, Deserialize)]
pub struct ThemeFile {
    pub meta: ThemeMeta,
    pub dark: ThemeVariant,
    pub light: ThemeVariant,
}

#[derive(Debug, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeVariant {
    pub surface: SurfaceColors,
    pub text: TextColors,
    pub primary: PrimaryColors,
    pub error: ErrorColors,
}

#[derive(Debug, Deserialize)]
pub struct SurfaceColors {
    #[serde(with = "hex_color")]
    pub base: Color,
    #[serde(with = "hex_color")]
    pub container_low: Color,
    #[serde(with = "hex_color")]
    pub container: Color,
    #[serde(with = "hex_color")]
    pub container_high: Color,
    #[serde(with = "hex_color")]
    pub bright: Color,
}

#[derive(Debug, Deserialize)]
pub struct TextColors {
    #[serde(with = "hex_color")]
    pub on_surface: Color,
    #[serde(with = "hex_color")]
    pub on_surface_variant: Color,
    #[serde(with = "hex_color")]
    pub outline: Color,
    #[serde(with = "hex_color")]
    pub outline_variant: Color,
}

#[derive(Debug, Deserialize)]
pub struct PrimaryColors {
    #[serde(with = "hex_color")]
    pub base: Color,
    #[serde(with = "hex_color")]
    pub hover: Color,
    #[serde(with = "hex_color")]
    pub dim: Color,
}

#[derive(Debug, Deserialize)]
pub struct ErrorColors {
    #[serde(with = "hex_color")]
    pub base: Color,
}

pub use kensaku_core::config::ThemeMode;

// ── ColorScheme ────────────────────────────────────────────────────

/// All semantic color tokens, flattened for style closures.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces, low -> high elevation
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Accent
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_dim: Color,

    pub error: Color,
}

impl ColorScheme {
    pub fn from_variant(v: &ThemeVariant) -> Self {
        Self {
            surface: v.surface.base,
            surface_container_low: v.surface.container_low,
            surface_container: v.surface.container,
            surface_container_high: v.surface.container_high,
            surface_bright: v.surface.bright,

            on_surface: v.text.on_surface,
            on_surface_variant: v.text.on_surface_variant,
            outline: v.text.outline,
            outline_variant: v.text.outline_variant,

            primary: v.primary.base,
            primary_hover: v.primary.hover,
            primary_dim: v.primary.dim,

            error: v.error.base,
        }
    }
}
