//! Theme tokens.
//!
//! Renderers reference theme values by role (`var(--color-primary)`), never by
//! literal value, so a theme edit propagates without touching block data.

use pagecraft_common::{readable_text_on, sanitize_css_value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Surface,
    Text,
    TextMuted,
    Border,
    Success,
    Warning,
    Error,
}

impl ColorRole {
    pub const ALL: [ColorRole; 11] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Text,
        ColorRole::TextMuted,
        ColorRole::Border,
        ColorRole::Success,
        ColorRole::Warning,
        ColorRole::Error,
    ];

    /// Roles that also get a derived `-contrast` foreground token.
    pub const WITH_CONTRAST: [ColorRole; 3] =
        [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent];

    pub fn name(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Surface => "surface",
            ColorRole::Text => "text",
            ColorRole::TextMuted => "text-muted",
            ColorRole::Border => "border",
            ColorRole::Success => "success",
            ColorRole::Warning => "warning",
            ColorRole::Error => "error",
        }
    }

    /// `var(--color-<role>)`
    pub fn var(&self) -> String {
        format!("var(--color-{})", self.name())
    }

    /// `var(--color-<role>-contrast)`, readable text on this colour.
    pub fn contrast_var(&self) -> String {
        format!("var(--color-{}-contrast)", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Heading,
    Body,
    Mono,
}

impl FontRole {
    pub fn name(&self) -> &'static str {
        match self {
            FontRole::Heading => "heading",
            FontRole::Body => "body",
            FontRole::Mono => "mono",
        }
    }

    pub fn var(&self) -> String {
        format!("var(--font-{})", self.name())
    }

    fn fallback(&self) -> &'static str {
        match self {
            FontRole::Mono => "ui-monospace, monospace",
            _ => "system-ui, sans-serif",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl ThemeColors {
    pub fn get(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Background => &self.background,
            ColorRole::Surface => &self.surface,
            ColorRole::Text => &self.text,
            ColorRole::TextMuted => &self.text_muted,
            ColorRole::Border => &self.border,
            ColorRole::Success => &self.success,
            ColorRole::Warning => &self.warning,
            ColorRole::Error => &self.error,
        }
    }

    pub fn set(&mut self, role: ColorRole, value: impl Into<String>) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Background => &mut self.background,
            ColorRole::Surface => &mut self.surface,
            ColorRole::Text => &mut self.text,
            ColorRole::TextMuted => &mut self.text_muted,
            ColorRole::Border => &mut self.border,
            ColorRole::Success => &mut self.success,
            ColorRole::Warning => &mut self.warning,
            ColorRole::Error => &mut self.error,
        };
        *slot = value.into();
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "hsl(221, 83%, 53%)".to_string(),
            secondary: "hsl(271, 81%, 65%)".to_string(),
            accent: "hsl(0, 84%, 60%)".to_string(),
            background: "hsl(0, 0%, 100%)".to_string(),
            surface: "hsl(210, 20%, 98%)".to_string(),
            text: "hsl(222, 47%, 11%)".to_string(),
            text_muted: "hsl(215, 20%, 65%)".to_string(),
            border: "hsl(214, 32%, 91%)".to_string(),
            success: "hsl(142, 71%, 45%)".to_string(),
            warning: "hsl(45, 93%, 47%)".to_string(),
            error: "hsl(0, 84%, 60%)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    pub mono_font: String,
    pub base_size: String,
}

impl Typography {
    pub fn font(&self, role: FontRole) -> &str {
        match role {
            FontRole::Heading => &self.heading_font,
            FontRole::Body => &self.body_font,
            FontRole::Mono => &self.mono_font,
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_font: "Inter".to_string(),
            body_font: "Inter".to_string(),
            mono_font: "JetBrains Mono".to_string(),
            base_size: "1rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub colors: ThemeColors,

    #[serde(default)]
    pub typography: Typography,

    #[serde(default = "default_spacing")]
    pub spacing: BTreeMap<String, String>,

    #[serde(default = "default_radius")]
    pub radius: BTreeMap<String, String>,

    /// Author CSS appended after all block styles
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_css: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            typography: Typography::default(),
            spacing: default_spacing(),
            radius: default_radius(),
            custom_css: String::new(),
        }
    }
}

impl Theme {
    /// `var(--space-<key>)`
    pub fn space_var(key: &str) -> String {
        format!("var(--space-{})", key)
    }

    /// `var(--radius-<key>)`
    pub fn radius_var(key: &str) -> String {
        format!("var(--radius-{})", key)
    }

    /// Every theme token as `(custom property, value)`, in a fixed order.
    pub fn tokens(&self) -> Vec<(String, String)> {
        let mut tokens = Vec::new();

        for role in ColorRole::ALL {
            tokens.push((
                format!("--color-{}", role.name()),
                sanitize_css_value(self.colors.get(role)),
            ));
        }
        for role in ColorRole::WITH_CONTRAST {
            tokens.push((
                format!("--color-{}-contrast", role.name()),
                readable_text_on(self.colors.get(role)).to_string(),
            ));
        }

        for role in [FontRole::Heading, FontRole::Body, FontRole::Mono] {
            let family = self.typography.font(role).replace(['"', '\''], "");
            tokens.push((
                format!("--font-{}", role.name()),
                sanitize_css_value(&format!("\"{}\", {}", family, role.fallback())),
            ));
        }
        tokens.push((
            "--font-size-base".to_string(),
            sanitize_css_value(&self.typography.base_size),
        ));

        for (key, value) in &self.spacing {
            tokens.push((format!("--space-{}", key), sanitize_css_value(value)));
        }
        for (key, value) in &self.radius {
            tokens.push((format!("--radius-{}", key), sanitize_css_value(value)));
        }

        tokens
    }
}

fn default_spacing() -> BTreeMap<String, String> {
    [
        ("xs", "0.5rem"),
        ("sm", "1rem"),
        ("md", "1.5rem"),
        ("lg", "2rem"),
        ("xl", "3rem"),
        ("2xl", "4rem"),
        ("section", "5rem"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_radius() -> BTreeMap<String, String> {
    [("sm", "0.25rem"), ("md", "0.5rem"), ("lg", "1rem"), ("full", "9999px")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_cover_every_role() {
        let tokens = Theme::default().tokens();
        for role in ColorRole::ALL {
            let name = format!("--color-{}", role.name());
            assert!(tokens.iter().any(|(k, _)| *k == name), "missing {}", name);
        }
        assert!(tokens.iter().any(|(k, _)| k == "--color-primary-contrast"));
        assert!(tokens.iter().any(|(k, _)| k == "--space-section"));
        assert!(tokens.iter().any(|(k, _)| k == "--radius-full"));
    }

    #[test]
    fn test_font_tokens_are_quoted_with_fallback() {
        let mut theme = Theme::default();
        theme.typography.heading_font = "Playfair \"Display\"".to_string();
        let tokens = theme.tokens();
        let heading = tokens.iter().find(|(k, _)| k == "--font-heading").unwrap();
        assert_eq!(heading.1, "\"Playfair Display\", system-ui, sans-serif");
    }

    #[test]
    fn test_role_vars() {
        assert_eq!(ColorRole::TextMuted.var(), "var(--color-text-muted)");
        assert_eq!(ColorRole::Primary.contrast_var(), "var(--color-primary-contrast)");
        assert_eq!(FontRole::Heading.var(), "var(--font-heading)");
        assert_eq!(Theme::space_var("lg"), "var(--space-lg)");
    }

    #[test]
    fn test_contrast_token_follows_primary() {
        let mut theme = Theme::default();
        theme.colors.set(ColorRole::Primary, "#ffffff");
        let tokens = theme.tokens();
        let contrast = tokens
            .iter()
            .find(|(k, _)| k == "--color-primary-contrast")
            .unwrap();
        assert_eq!(contrast.1, "#111827");
    }
}
