//! Theme settings and their application to a [`StyleStore`].

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::ramp::{ColorRamp, ShadeStep};
use crate::store::StyleStore;

/// Theme colors as persisted under the `themeColors` setting.
///
/// Every field is optional. Applying a config only touches the variables
/// of the fields it carries; nothing is reset to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_text_color: Option<String>,
}

/// The non-primary theme fields and the variables they drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeField {
    Background,
    Text,
    PostBackground,
    PostText,
    SectionBackground,
    SectionText,
}

impl ThemeField {
    pub const ALL: [ThemeField; 6] = [
        ThemeField::Background,
        ThemeField::Text,
        ThemeField::PostBackground,
        ThemeField::PostText,
        ThemeField::SectionBackground,
        ThemeField::SectionText,
    ];

    pub fn var_name(self) -> &'static str {
        match self {
            ThemeField::Background => "--color-bg",
            ThemeField::Text => "--color-text",
            ThemeField::PostBackground => "--color-post-bg",
            ThemeField::PostText => "--color-post-text",
            ThemeField::SectionBackground => "--color-section-bg",
            ThemeField::SectionText => "--color-section-text",
        }
    }
}

/// Variable name for a primary ramp step, e.g. `--color-primary-500`.
pub fn primary_var(step: ShadeStep) -> String {
    format!("--color-primary-{}", step.key())
}

impl ThemeConfig {
    /// The dark palette the shell starts from before any settings load.
    pub fn dark() -> Self {
        Self {
            primary_color: Some("#22c55e".to_string()),
            background_color: Some("#18181b".to_string()),
            text_color: Some("#f4f4f5".to_string()),
            post_background_color: Some("#27272a".to_string()),
            post_text_color: Some("#e4e4e7".to_string()),
            section_background_color: Some("#27272a".to_string()),
            section_text_color: Some("#f4f4f5".to_string()),
        }
    }

    pub fn field(&self, field: ThemeField) -> Option<&str> {
        let value = match field {
            ThemeField::Background => &self.background_color,
            ThemeField::Text => &self.text_color,
            ThemeField::PostBackground => &self.post_background_color,
            ThemeField::PostText => &self.post_text_color,
            ThemeField::SectionBackground => &self.section_background_color,
            ThemeField::SectionText => &self.section_text_color,
        };
        value.as_deref()
    }

    fn field_mut(&mut self, field: ThemeField) -> &mut Option<String> {
        match field {
            ThemeField::Background => &mut self.background_color,
            ThemeField::Text => &mut self.text_color,
            ThemeField::PostBackground => &mut self.post_background_color,
            ThemeField::PostText => &mut self.post_text_color,
            ThemeField::SectionBackground => &mut self.section_background_color,
            ThemeField::SectionText => &mut self.section_text_color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none() && ThemeField::ALL.iter().all(|f| self.field(*f).is_none())
    }

    /// Drops every field that is not a valid hex color.
    ///
    /// Settings are edited by hand and by other tools; this is where bad
    /// input is caught so [`apply_theme`] only ever sees valid colors.
    pub fn sanitized(mut self) -> Self {
        if let Some(primary) = self.primary_color.take() {
            match HexColor::parse(&primary) {
                Ok(_) => self.primary_color = Some(primary),
                Err(err) => tracing::warn!(%err, "Ignoring invalid primary color"),
            }
        }
        for field in ThemeField::ALL {
            let slot = self.field_mut(field);
            if let Some(value) = slot.take() {
                match HexColor::parse(&value) {
                    Ok(_) => *slot = Some(value),
                    Err(err) => {
                        tracing::warn!(%err, var = field.var_name(), "Ignoring invalid theme color")
                    }
                }
            }
        }
        self
    }
}

/// Writes the variables for every field present in `theme`.
///
/// For `primaryColor` the whole [`ColorRamp`] is written. Calling this twice
/// with the same config leaves the store as after the first call.
pub fn apply_theme(store: &StyleStore, theme: &ThemeConfig) {
    if let Some(primary) = theme.primary_color.as_deref() {
        let ramp = ColorRamp::generate(primary);
        for (step, value) in ramp.iter() {
            store.set_property(&primary_var(step), value);
        }
    }

    for field in ThemeField::ALL {
        if let Some(value) = theme.field(field) {
            store.set_property(field.var_name(), value);
        }
    }

    tracing::debug!(revision = store.revision(), "Theme applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let theme: ThemeConfig = serde_json::from_str(
            r##"{"primaryColor":"#112233","postTextColor":"#ffffff","unknown":1}"##,
        )
        .unwrap();
        assert_eq!(theme.primary_color.as_deref(), Some("#112233"));
        assert_eq!(theme.post_text_color.as_deref(), Some("#ffffff"));
        assert!(theme.background_color.is_none());
    }

    #[test]
    fn test_apply_writes_ramp_and_fields() {
        let store = StyleStore::new();
        apply_theme(&store, &ThemeConfig::dark());

        for step in ShadeStep::ALL {
            assert!(store.contains(&primary_var(step)));
        }
        assert_eq!(store.get("--color-bg").as_deref(), Some("#18181b"));
        assert_eq!(store.get("--color-section-text").as_deref(), Some("#f4f4f5"));
        assert_eq!(store.len(), 12 + 6);
    }

    #[test]
    fn test_partial_config_keeps_other_vars() {
        let store = StyleStore::new();
        apply_theme(&store, &ThemeConfig::dark());

        let partial = ThemeConfig {
            text_color: Some("#000000".to_string()),
            ..Default::default()
        };
        apply_theme(&store, &partial);

        assert_eq!(store.get("--color-text").as_deref(), Some("#000000"));
        assert_eq!(store.get("--color-bg").as_deref(), Some("#18181b"));
        assert_eq!(
            store.get("--color-primary-500").as_deref(),
            Some("#22c55e")
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let theme = ThemeConfig {
            primary_color: Some("#3366cc".to_string()),
            post_background_color: Some("#101010".to_string()),
            ..Default::default()
        };

        let once = StyleStore::new();
        apply_theme(&once, &theme);

        let twice = StyleStore::new();
        apply_theme(&twice, &theme);
        apply_theme(&twice, &theme);

        assert_eq!(once.snapshot(), twice.snapshot());
        assert_eq!(once.revision(), twice.revision());
    }

    #[test]
    fn test_sanitized_drops_bad_colors() {
        let theme = ThemeConfig {
            primary_color: Some("#12".to_string()),
            text_color: Some("#abcdef".to_string()),
            section_background_color: Some("red".to_string()),
            ..Default::default()
        }
        .sanitized();

        assert!(theme.primary_color.is_none());
        assert!(theme.section_background_color.is_none());
        assert_eq!(theme.text_color.as_deref(), Some("#abcdef"));
        assert!(!theme.is_empty());
        assert!(ThemeConfig::default().is_empty());
    }
}
