//! Palette read from the style store.
//!
//! ## Learning: One Source of Truth
//!
//! Widgets never hold colors of their own. Every frame the palette is read
//! back from the `--color-*` variables, so a live theme change repaints the
//! whole shell on the next render without extra bookkeeping.

use fitcoach_style::{HexColor, ShadeStep, StyleStore, ThemeField, primary_var};
use iced::Color;

/// Colors used by the shell widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub background: Color,
    pub text: Color,
    pub post_background: Color,
    pub post_text: Color,
    pub section_background: Color,
    pub section_text: Color,
    pub muted: Color,
}

pub mod fallback {
    use iced::Color;

    pub const PRIMARY: Color = Color::from_rgb(0.13, 0.77, 0.37);
    pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
    pub const SURFACE: Color = Color::from_rgb(0.15, 0.15, 0.16);
    pub const TEXT: Color = Color::from_rgb(0.96, 0.96, 0.96);
}

impl Palette {
    pub fn from_styles(styles: &StyleStore) -> Self {
        let primary = var_color(styles, &primary_var(ShadeStep::S500), fallback::PRIMARY);
        let text = var_color(styles, ThemeField::Text.var_name(), fallback::TEXT);

        Self {
            primary,
            primary_light: var_color(styles, &primary_var(ShadeStep::S300), primary),
            primary_dark: var_color(styles, &primary_var(ShadeStep::S700), primary),
            background: var_color(styles, ThemeField::Background.var_name(), fallback::BACKGROUND),
            text,
            post_background: var_color(styles, ThemeField::PostBackground.var_name(), fallback::SURFACE),
            post_text: var_color(styles, ThemeField::PostText.var_name(), text),
            section_background: var_color(
                styles,
                ThemeField::SectionBackground.var_name(),
                fallback::SURFACE,
            ),
            section_text: var_color(styles, ThemeField::SectionText.var_name(), text),
            muted: Color { a: 0.6, ..text },
        }
    }
}

fn var_color(styles: &StyleStore, name: &str, fallback: Color) -> Color {
    styles
        .get(name)
        .and_then(|value| HexColor::parse(&value).ok())
        .map_or(fallback, to_iced)
}

/// Converts a parsed hex color to an iced color.
pub fn to_iced(color: HexColor) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_style::{ThemeConfig, apply_theme};

    #[test]
    fn test_palette_follows_store() {
        let styles = StyleStore::new();
        apply_theme(
            &styles,
            &ThemeConfig {
                primary_color: Some("#ff0000".to_string()),
                background_color: Some("#000000".to_string()),
                ..Default::default()
            },
        );

        let palette = Palette::from_styles(&styles);
        assert_eq!(palette.primary, Color::from_rgb8(255, 0, 0));
        assert_eq!(palette.background, Color::BLACK);
        assert_eq!(palette.text, fallback::TEXT);
        assert_eq!(palette.primary_dark, Color::from_rgb8(175, 0, 0));
    }

    #[test]
    fn test_empty_store_uses_fallbacks() {
        let palette = Palette::from_styles(&StyleStore::new());
        assert_eq!(palette.primary, fallback::PRIMARY);
        assert_eq!(palette.post_text, fallback::TEXT);
    }
}
