//! Visual themes for rendered decks.

use serde::Serialize;

/// Theme used when none or an unknown one is requested.
pub const DEFAULT_THEME: &str = "professional";

/// Font faces for headings and body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub title: &'static str,
    pub body: &'static str,
}

/// Colors (six-digit hex, no `#`), fonts and display name of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeDefinition {
    #[serde(skip)]
    pub id: &'static str,
    pub name: &'static str,
    pub bg: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub fonts: ThemeFonts,
}

static THEMES: [ThemeDefinition; 5] = [
    ThemeDefinition {
        id: "professional",
        name: "Professional Blue",
        bg: "FFFFFF",
        title: "2c3e50",
        text: "34495e",
        accent: "3498db",
        fonts: ThemeFonts { title: "Calibri", body: "Calibri" },
    },
    ThemeDefinition {
        id: "creative",
        name: "Creative Orange",
        bg: "fff8f0",
        title: "e74c3c",
        text: "2c3e50",
        accent: "f39c12",
        fonts: ThemeFonts { title: "Arial", body: "Arial" },
    },
    ThemeDefinition {
        id: "dark",
        name: "Dark Modern",
        bg: "2c3e50",
        title: "ecf0f1",
        text: "bdc3c7",
        accent: "3498db",
        fonts: ThemeFonts { title: "Calibri", body: "Calibri" },
    },
    ThemeDefinition {
        id: "academic",
        name: "Academic Purple",
        bg: "ffffff",
        title: "2980b9",
        text: "2c3e50",
        accent: "8e44ad",
        fonts: ThemeFonts { title: "Times New Roman", body: "Times New Roman" },
    },
    ThemeDefinition {
        id: "elegant",
        name: "Elegant Purple",
        bg: "f8f9fa",
        title: "6f42c1",
        text: "495057",
        accent: "fd7e14",
        fonts: ThemeFonts { title: "Georgia", body: "Georgia" },
    },
];

impl ThemeDefinition {
    /// All registered themes, in display order.
    pub fn all() -> &'static [ThemeDefinition] {
        &THEMES
    }

    /// Look up a theme by id.
    pub fn get(id: &str) -> Option<&'static ThemeDefinition> {
        THEMES.iter().find(|theme| theme.id == id)
    }

    /// Look up a theme, falling back to the default for unknown ids.
    pub fn get_or_default(id: Option<&str>) -> &'static ThemeDefinition {
        id.and_then(Self::get).unwrap_or(&THEMES[0])
    }
}

/// Theme as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: &'static ThemeDefinition,
}

impl From<&'static ThemeDefinition> for ThemeSummary {
    fn from(theme: &'static ThemeDefinition) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            colors: theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_professional() {
        assert_eq!(THEMES[0].id, DEFAULT_THEME);
        assert_eq!(ThemeDefinition::get_or_default(None).name, "Professional Blue");
        assert_eq!(ThemeDefinition::get_or_default(Some("neon")).id, "professional");
        assert_eq!(ThemeDefinition::get_or_default(Some("dark")).bg, "2c3e50");
    }

    #[test]
    fn test_ids_are_unique() {
        let themes = ThemeDefinition::all();
        for (i, theme) in themes.iter().enumerate() {
            assert!(themes[i + 1..].iter().all(|other| other.id != theme.id));
        }
    }

    #[test]
    fn test_summary_json() {
        let summary = ThemeSummary::from(ThemeDefinition::get_or_default(Some("academic")));
        let json = serde_json::to_value(summary).unwrap();

        assert_eq!(json["id"], "academic");
        assert_eq!(json["name"], "Academic Purple");
        assert_eq!(json["colors"]["accent"], "8e44ad");
        assert_eq!(json["colors"]["fonts"]["body"], "Times New Roman");
        assert!(json["colors"].get("id").is_none());
    }
}
