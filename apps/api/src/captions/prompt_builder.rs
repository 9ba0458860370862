//! Prompt Builder — renders the user instruction sent to the chat model.
//!
//! Output is one line per rule, joined with `\n`, in this order:
//! opening, length, tone, platform, hashtags (optional), emojis (optional), closing.

use crate::captions::error::CaptionError;
use crate::captions::prompts::{EMOJI_INSTRUCTION, ENGAGEMENT_INSTRUCTION, HASHTAG_INSTRUCTION};
use crate::captions::style::{Length, Platform, StyleOptions, Tone};

/// Builds the caption instruction for `content` under `options`.
///
/// Fails only when `content` is blank. The content is embedded verbatim.
pub fn build(content: &str, options: &StyleOptions) -> Result<String, CaptionError> {
    if content.trim().is_empty() {
        return Err(CaptionError::Validation(
            "Content description is required".to_string(),
        ));
    }

    let mut lines = vec![
        format!(
            "Create a {} {} caption about: {}",
            options.tone, options.platform, content
        ),
        format!("Length: {}", length_spec(&options.length)),
        format!("Tone: {}", tone_spec(&options.tone)),
        format!(
            "Platform: {} - make it {}",
            options.platform,
            platform_spec(&options.platform)
        ),
    ];

    if options.include_hashtags {
        lines.push(HASHTAG_INSTRUCTION.to_string());
    }
    if options.include_emojis {
        lines.push(EMOJI_INSTRUCTION.to_string());
    }

    lines.push(ENGAGEMENT_INSTRUCTION.to_string());

    Ok(lines.join("\n"))
}

pub fn length_spec(length: &Length) -> &'static str {
    match length {
        Length::Short => "1-2 sentences",
        Length::Medium => "3-4 sentences",
        Length::Long => "1-2 paragraphs",
        Length::Other(_) => "medium length",
    }
}

pub fn tone_spec(tone: &Tone) -> &'static str {
    match tone {
        Tone::Casual => "conversational and friendly",
        Tone::Professional => "polished and business-appropriate",
        Tone::Witty => "clever and humorous",
        Tone::Inspirational => "motivating and uplifting",
        Tone::Storytelling => "narrative and engaging",
        // No dedicated phrasing for promotional copy.
        Tone::Promotional | Tone::Other(_) => "engaging",
    }
}

pub fn platform_spec(platform: &Platform) -> &'static str {
    match platform {
        Platform::Instagram => "engaging and visual-focused",
        Platform::Twitter => "concise and trending",
        Platform::LinkedIn => "professional and networking-focused",
        Platform::TikTok => "trendy and youth-oriented",
        Platform::Facebook | Platform::Other(_) => "engaging",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(
        platform: &str,
        tone: &str,
        length: &str,
        include_hashtags: bool,
        include_emojis: bool,
    ) -> StyleOptions {
        StyleOptions {
            platform: platform.into(),
            tone: tone.into(),
            length: length.into(),
            include_hashtags,
            include_emojis,
        }
    }

    #[test]
    fn test_sunset_scenario_matches_line_by_line() {
        let prompt = build(
            "a sunset over the ocean",
            &options("instagram", "casual", "short", true, true),
        )
        .unwrap();

        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Create a casual instagram caption about: a sunset over the ocean",
                "Length: 1-2 sentences",
                "Tone: conversational and friendly",
                "Platform: instagram - make it engaging and visual-focused",
                "Include relevant hashtags (3-5 hashtags)",
                "Include appropriate emojis",
                "Generate an engaging caption that would encourage likes, comments, and shares.",
            ]
        );
    }

    #[test]
    fn test_empty_content_is_rejected_for_any_options() {
        let variants = [
            StyleOptions::default(),
            options("twitter", "witty", "long", false, false),
            options("unknown", "unknown", "unknown", true, false),
        ];
        for opts in &variants {
            assert!(matches!(build("", opts), Err(CaptionError::Validation(_))));
            assert!(matches!(
                build("   \n\t", opts),
                Err(CaptionError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_hashtag_and_emoji_lines_follow_flags() {
        for (hashtags, emojis) in [(true, true), (true, false), (false, true), (false, false)] {
            let prompt = build(
                "coffee",
                &options("twitter", "witty", "medium", hashtags, emojis),
            )
            .unwrap();
            assert_eq!(prompt.contains(HASHTAG_INSTRUCTION), hashtags);
            assert_eq!(prompt.contains(EMOJI_INSTRUCTION), emojis);
            assert!(prompt.ends_with(ENGAGEMENT_INSTRUCTION));
        }
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        let prompt = build("a launch", &options("myspace", "grumpy", "epic", false, false)).unwrap();
        assert!(prompt.starts_with("Create a grumpy myspace caption about: a launch"));
        assert!(prompt.contains("Length: medium length"));
        assert!(prompt.contains("Tone: engaging"));
        assert!(prompt.contains("Platform: myspace - make it engaging"));
    }

    #[test]
    fn test_facebook_and_promotional_use_generic_phrasing() {
        let prompt = build("a sale", &options("facebook", "promotional", "long", false, false))
            .unwrap();
        assert!(prompt.contains("Tone: engaging"));
        assert!(prompt.contains("Platform: facebook - make it engaging"));
        assert!(prompt.contains("Length: 1-2 paragraphs"));
    }

    #[test]
    fn test_content_is_embedded_verbatim() {
        let prompt = build("  spaced  out  ", &StyleOptions::default()).unwrap();
        assert!(prompt.contains("caption about:   spaced  out  "));
    }

    #[test]
    fn test_mixed_case_input_renders_lowercase() {
        let prompt = build("team offsite", &options("LinkedIn", "Professional", "Medium", false, false))
            .unwrap();
        assert!(prompt.starts_with("Create a professional linkedin caption about: team offsite"));
        assert!(prompt.contains("Tone: polished and business-appropriate"));
        assert!(prompt.contains("Platform: linkedin - make it professional and networking-focused"));
        assert!(prompt.contains("Length: 3-4 sentences"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let opts = options("tiktok", "inspirational", "short", true, false);
        assert_eq!(build("dance", &opts).unwrap(), build("dance", &opts).unwrap());
        assert!(build("dance", &opts)
            .unwrap()
            .contains("Tone: motivating and uplifting"));
    }
}
