//! Caption Generation Service — the pluggable backend that turns a request into caption
//! variants.
//!
//! `AppState` carries an `Arc<dyn CaptionService>`; the backend is picked at startup
//! (`LlmCaptionService` or `MockCaptionService`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::captions::error::CaptionError;
use crate::captions::style::StyleOptions;
use crate::llm_client::Usage;

/// Hard cap on hashtags kept per caption.
pub const MAX_HASHTAGS: usize = 8;

/// Everything a backend needs to produce captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub options: StyleOptions,
}

/// One caption variant as returned by a backend, before it is tagged into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCaption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
}

/// Everything one backend call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBatch {
    pub captions: Vec<GeneratedCaption>,
    /// Only backends that bill by token report this.
    pub usage: Option<Usage>,
}

#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Produces caption variants in generation order.
    ///
    /// A request the backend cannot build a prompt for is a `Validation` error; every
    /// other failure is `Service`.
    async fn generate(&self, request: &GenerationRequest) -> Result<CaptionBatch, CaptionError>;

    /// Short backend label for logs ("openai" | "mock").
    fn backend_name(&self) -> &'static str;
}

/// Collects `#tag` tokens from caption text in order of first appearance.
///
/// Trailing punctuation is stripped, duplicates are dropped case-insensitively and the
/// result is capped at `MAX_HASHTAGS`.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        let Some(body) = token.strip_prefix('#') else {
            continue;
        };
        let word: String = body
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if word.is_empty() {
            continue;
        }
        if tags
            .iter()
            .any(|existing| existing[1..].eq_ignore_ascii_case(&word))
        {
            continue;
        }
        tags.push(format!("#{word}"));
        if tags.len() == MAX_HASHTAGS {
            break;
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::style::{Length, Platform, Tone};

    #[test]
    fn test_extract_hashtags_in_order() {
        let text = "Golden hour magic ✨ #sunset #ocean #GoldenHour";
        assert_eq!(
            extract_hashtags(text),
            vec!["#sunset", "#ocean", "#GoldenHour"]
        );
    }

    #[test]
    fn test_extract_hashtags_strips_punctuation_and_dedupes() {
        let text = "Loved it! #travel, #Travel #beach. # #!";
        assert_eq!(extract_hashtags(text), vec!["#travel", "#beach"]);
    }

    #[test]
    fn test_extract_hashtags_caps_at_eight() {
        let text = (1..=12).map(|i| format!("#tag{i}")).collect::<Vec<_>>().join(" ");
        let tags = extract_hashtags(&text);
        assert_eq!(tags.len(), MAX_HASHTAGS);
        assert_eq!(tags.last().map(String::as_str), Some("#tag8"));
    }

    #[test]
    fn test_extract_hashtags_none_present() {
        assert!(extract_hashtags("no tags here").is_empty());
    }

    #[test]
    fn test_generation_request_wire_shape() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "content": "new menu launch",
            "platform": "TikTok",
            "tone": "witty",
            "length": "short",
            "includeHashtags": false
        }))
        .unwrap();

        assert_eq!(request.content, "new menu launch");
        assert_eq!(request.options.platform, Platform::TikTok);
        assert_eq!(request.options.tone, Tone::Witty);
        assert_eq!(request.options.length, Length::Short);
        assert!(!request.options.include_hashtags);
        assert!(request.options.include_emojis);
    }

    #[test]
    fn test_generation_request_missing_content_defaults_to_empty() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.content.is_empty());
        assert_eq!(request.options, StyleOptions::default());
    }

    #[test]
    fn test_generated_caption_omits_absent_hashtags() {
        let caption = GeneratedCaption {
            text: "hello".to_string(),
            hashtags: None,
        };
        let value = serde_json::to_value(&caption).unwrap();
        assert!(value.get("hashtags").is_none());
    }
}
