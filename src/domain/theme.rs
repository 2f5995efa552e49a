// Theme domain model
use serde::{Deserialize, Serialize};

pub const DEFAULT_HUE: u16 = 24;
pub const DEFAULT_INTENSITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse a stored mode; anything unrecognised is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            ThemeMode::Dark => Some("theme-dark"),
            ThemeMode::Light => None,
        }
    }

    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "bi bi-sun-fill",
            ThemeMode::Light => "bi bi-moon-stars",
        }
    }
}

/// Accent palette: hue in degrees, intensity as a saturation percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub hue: u16,
    pub intensity: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hue: DEFAULT_HUE,
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl Palette {
    pub fn new(hue: i64, intensity: i64) -> Self {
        Self {
            hue: hue.clamp(0, 360) as u16,
            intensity: intensity.clamp(0, 100) as u8,
        }
    }

    pub fn parse_hue(value: &str) -> Option<i64> {
        value.trim().parse().ok()
    }

    /// Accepts both `"80"` and `"80%"`.
    pub fn parse_intensity(value: &str) -> Option<i64> {
        value.trim().trim_end_matches('%').trim().parse().ok()
    }

    pub fn hue_value(&self) -> String {
        self.hue.to_string()
    }

    pub fn intensity_value(&self) -> String {
        format!("{}%", self.intensity)
    }

    pub fn accent(&self) -> String {
        format!("hsl({}, {}%, 55%)", self.hue, self.intensity)
    }

    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--hue", self.hue_value()),
            ("--intensity", self.intensity_value()),
        ]
    }
}

/// Turn an `hsl(...)` colour into `hsla(..., alpha)`; other colours yield `None`.
pub fn with_alpha(color: &str, alpha: f32) -> Option<String> {
    let inner = color.trim().strip_prefix("hsl(")?.strip_suffix(')')?;
    Some(format!("hsla({}, {})", inner, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_stored() {
        assert_eq!(ThemeMode::from_stored(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(Some("sepia")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(None), ThemeMode::Light);
    }

    #[test]
    fn test_mode_presentation() {
        assert_eq!(ThemeMode::Dark.body_class(), Some("theme-dark"));
        assert_eq!(ThemeMode::Light.body_class(), None);
        assert_eq!(ThemeMode::Dark.toggle_icon(), "bi bi-sun-fill");
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_palette_clamps() {
        let palette = Palette::new(400, -3);
        assert_eq!(palette.hue, 360);
        assert_eq!(palette.intensity, 0);
    }

    #[test]
    fn test_intensity_parsing() {
        assert_eq!(Palette::parse_intensity("80%"), Some(80));
        assert_eq!(Palette::parse_intensity("80"), Some(80));
        assert_eq!(Palette::parse_intensity("lots"), None);
    }

    #[test]
    fn test_accent_and_alpha() {
        let palette = Palette::new(210, 80);
        assert_eq!(palette.accent(), "hsl(210, 80%, 55%)");
        assert_eq!(
            with_alpha(&palette.accent(), 0.35).as_deref(),
            Some("hsla(210, 80%, 55%, 0.35)")
        );
        assert_eq!(with_alpha("#ff8c40", 0.35), None);
        assert_eq!(
            palette.css_variables(),
            vec![("--hue", "210".to_string()), ("--intensity", "80%".to_string())]
        );
    }
}
