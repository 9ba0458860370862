//! Per-platform caption length limits and text helpers used when reporting captions.

use serde::Serialize;

use crate::captions::style::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLimits {
    /// Hard limit enforced by the platform, in characters.
    pub max_length: usize,
    /// Length that tends to perform best.
    pub recommended_length: usize,
}

const INSTAGRAM_LIMITS: PlatformLimits = PlatformLimits {
    max_length: 2200,
    recommended_length: 125,
};

/// Unknown platforms get Instagram's limits.
pub fn limits_for(platform: &Platform) -> PlatformLimits {
    match platform {
        Platform::Instagram | Platform::Other(_) => INSTAGRAM_LIMITS,
        Platform::Twitter => PlatformLimits {
            max_length: 280,
            recommended_length: 200,
        },
        Platform::LinkedIn => PlatformLimits {
            max_length: 3000,
            recommended_length: 150,
        },
        Platform::TikTok => PlatformLimits {
            max_length: 150,
            recommended_length: 100,
        },
        Platform::Facebook => PlatformLimits {
            max_length: 63206,
            recommended_length: 200,
        },
    }
}

/// Length in characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn character_count(text: &str) -> String {
    format!("{} characters", char_len(text))
}

/// Returns `text` unchanged if it fits in `max_length` characters, otherwise the first
/// `max_length - 3` characters followed by `...`.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_length.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
