//! Style options — the platform / tone / length enumerations a caption is generated for.
//!
//! Every enum accepts unknown wire values through an `Other` variant. Unknown values are
//! carried through untouched and fall back to generic phrasing in the prompt builder
//! instead of rejecting the request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target social platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Instagram,
    Twitter,
    LinkedIn,
    TikTok,
    Facebook,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::TikTok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Other(raw) => raw,
        }
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "twitter" => Platform::Twitter,
            "linkedin" => Platform::LinkedIn,
            "tiktok" => Platform::TikTok,
            "facebook" => Platform::Facebook,
            _ => Platform::Other(raw),
        }
    }
}

impl From<&str> for Platform {
    fn from(raw: &str) -> Self {
        Platform::from(raw.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice of the caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Witty,
    Inspirational,
    Promotional,
    Storytelling,
    Other(String),
}

impl Tone {
    pub fn as_str(&self) -> &str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Witty => "witty",
            Tone::Inspirational => "inspirational",
            Tone::Promotional => "promotional",
            Tone::Storytelling => "storytelling",
            Tone::Other(raw) => raw,
        }
    }
}

impl From<String> for Tone {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "casual" => Tone::Casual,
            "professional" => Tone::Professional,
            "witty" => Tone::Witty,
            "inspirational" => Tone::Inspirational,
            "promotional" => Tone::Promotional,
            "storytelling" => Tone::Storytelling,
            _ => Tone::Other(raw),
        }
    }
}

impl From<&str> for Tone {
    fn from(raw: &str) -> Self {
        Tone::from(raw.to_string())
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.as_str().to_string()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested caption length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
    Other(String),
}

impl Length {
    pub fn as_str(&self) -> &str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
            Length::Other(raw) => raw,
        }
    }
}

impl From<String> for Length {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "short" => Length::Short,
            "medium" => Length::Medium,
            "long" => Length::Long,
            _ => Length::Other(raw),
        }
    }
}

impl From<&str> for Length {
    fn from(raw: &str) -> Self {
        Length::from(raw.to_string())
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.as_str().to_string()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full set of style choices for one generation.
/// Missing fields on the wire take their defaults (instagram, casual, medium, true, true).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    pub platform: Platform,
    pub tone: Tone,
    pub length: Length,
    pub include_hashtags: bool,
    pub include_emojis: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            tone: Tone::default(),
            length: Length::default(),
            include_hashtags: true,
            include_emojis: true,
        }
    }
}
