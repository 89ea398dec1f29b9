//! Application theme: one embedded TOML file with dark and light variants.

mod catalog;
mod colors;

pub use catalog::*;
pub use colors::*;

use iced::Theme;

/// Embedded default theme TOML source (contains both dark and light).
pub(crate) const DEFAULT_THEME_TOML: &str = include_str!("../assets/themes/default.toml");

/// A fully loaded theme with both appearance variants.
#[derive(Debug, Clone)]
pub struct KensakuTheme {
    pub name: String,
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl KensakuTheme {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let file: ThemeFile =
            toml::from_str(toml_str).map_err(|e| format!("theme parse error: {e}"))?;
        Ok(Self {
            name: file.meta.name,
            dark: ColorScheme::from_variant(&file.dark),
            light: ColorScheme::from_variant(&file.light),
        })
    }

    pub fn default_theme() -> Self {
        Self::from_toml(DEFAULT_THEME_TOML).expect("embedded default theme is valid TOML")
    }

    /// Color scheme for a resolved mode.
    pub fn colors(&self, mode: ThemeMode) -> &ColorScheme {
        match mode {
            ThemeMode::Light => &self.light,
            // Dark is the fallback for both Dark and System.
            _ => &self.dark,
        }
    }

    pub fn iced_theme(&self, mode: ThemeMode) -> Theme {
        build_theme(&self.name, self.colors(mode))
    }
}

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

pub fn build_theme(name: &str, cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        name.to_string(),
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.primary,
            warning: cs.primary_dim,
            danger: cs.error,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_theme_loads() {
        let theme = KensakuTheme::default_theme();
        assert_eq!(theme.name, "Kensaku");
        assert_eq!(theme.dark.surface, iced::Color::BLACK);
        assert_ne!(theme.dark.surface, theme.light.surface);
    }

    #[test]
    fn test_colors_fall_back_to_dark() {
        let theme = KensakuTheme::default_theme();
        assert_eq!(
            theme.colors(ThemeMode::System).surface,
            theme.dark.surface
        );
        assert_eq!(theme.colors(ThemeMode::Light).surface, theme.light.surface);
    }

    #[test]
    fn test_explicit_modes_resolve_to_themselves() {
        assert_eq!(resolve_mode(ThemeMode::Dark), ThemeMode::Dark);
        assert_eq!(resolve_mode(ThemeMode::Light), ThemeMode::Light);
    }

    #[test]
    fn test_from_toml_reports_missing_variant() {
        let err = KensakuTheme::from_toml("[meta]\nname = \"x\"\n").unwrap_err();
        assert!(err.starts_with("theme parse error"));
    }
}
