use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of the style selector. Unknown values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    Ghibli,
    Anime,
    Cinematic,
    Pixel,
    Cyberpunk,
    #[default]
    None,
    Custom(String),
}

impl Style {
    pub fn as_str(&self) -> &str {
        match self {
            Style::Ghibli => "ghibli",
            Style::Anime => "anime",
            Style::Cinematic => "cinematic",
            Style::Pixel => "pixel",
            Style::Cyberpunk => "cyberpunk",
            Style::None => "none",
            Style::Custom(value) => value,
        }
    }
}

impl From<&str> for Style {
    fn from(value: &str) -> Self {
        match value {
            "ghibli" => Style::Ghibli,
            "anime" => Style::Anime,
            "cinematic" => Style::Cinematic,
            "pixel" => Style::Pixel,
            "cyberpunk" => Style::Cyberpunk,
            "none" => Style::None,
            other => Style::Custom(other.to_string()),
        }
    }
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        Style::from(value.as_str())
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_styles_parse() {
        for id in ["ghibli", "anime", "cinematic", "pixel", "cyberpunk", "none"] {
            let style = Style::from(id);
            assert!(!matches!(style, Style::Custom(_)), "{} should be known", id);
            assert_eq!(style.as_str(), id);
        }
    }

    #[test]
    fn test_custom_style_is_verbatim() {
        let style = Style::from("oil-painting");
        assert_eq!(style, Style::Custom("oil-painting".to_string()));
        assert_eq!(style.to_string(), "oil-painting");
    }

    #[test]
    fn test_default_and_serde() {
        assert_eq!(Style::default().as_str(), "none");
        let json = serde_json::to_string(&Style::Anime).unwrap();
        assert_eq!(json, "\"anime\"");
        let back: Style = serde_json::from_str("\"watercolor\"").unwrap();
        assert_eq!(back.as_str(), "watercolor");
    }
}
