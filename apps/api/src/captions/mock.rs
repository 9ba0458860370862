//! Mock caption backend for local development and demos. No network access.
//!
//! Produces three stand-in captions per call. Emojis are picked at random, so tests seed
//! the RNG through `MockCaptionService::with_seed`.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::captions::error::CaptionError;
use crate::captions::service::{
    CaptionBatch, CaptionService, GeneratedCaption, GenerationRequest, MAX_HASHTAGS,
};
use crate::captions::style::{Length, Platform};

const MOCK_VARIANTS: usize = 3;

const EMOJIS: &[&str] = &[
    "✨", "💫", "🌟", "🔥", "💯", "🎯", "🚀", "💪", "❤️", "😊",
];

const COMMON_HASHTAGS: &[&str] = &[
    "#socialmedia",
    "#content",
    "#marketing",
    "#digital",
    "#growth",
];

pub struct MockCaptionService {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockCaptionService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    #[cfg(test)]
    pub fn with_seed(seed: u64, delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick_emoji(&self) -> &'static str {
        // A poisoned lock only means another caller panicked mid-pick; the RNG is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        EMOJIS[rng.gen_range(0..EMOJIS.len())]
    }

    fn caption_text(&self, request: &GenerationRequest) -> String {
        let options = &request.options;
        let base = format!(
            "This is a {} caption about {} for {}.",
            options.tone, request.content, options.platform
        );
        let text = match options.length {
            Length::Short => format!("{base} Perfect for quick engagement!"),
            Length::Medium => format!(
                "{base} It's designed to capture attention and encourage interaction from your audience."
            ),
            Length::Long => format!(
                "{base} This longer format allows you to tell a more complete story, share valuable \
                insights, and create deeper connections with your followers. It's perfect for when \
                you want to provide real value and establish thought leadership."
            ),
            Length::Other(_) => base,
        };

        if options.include_emojis {
            format!("{} {text}", self.pick_emoji())
        } else {
            text
        }
    }
}

fn platform_hashtags(platform: &Platform) -> &'static [&'static str] {
    match platform {
        Platform::Instagram => &["#instagram", "#instagood", "#photooftheday"],
        Platform::Twitter => &["#twitter", "#tweeting", "#social"],
        Platform::LinkedIn => &["#linkedin", "#professional", "#business"],
        Platform::TikTok => &["#tiktok", "#viral", "#trending"],
        Platform::Facebook => &["#facebook", "#social", "#community"],
        Platform::Other(_) => &[],
    }
}

/// First three content words as tags, then platform tags, then common tags; at most 8.
fn mock_hashtags(content: &str, platform: &Platform) -> Vec<String> {
    content
        .split_whitespace()
        .take(3)
        .map(|word| format!("#{}", word.to_lowercase()))
        .chain(platform_hashtags(platform).iter().map(|t| t.to_string()))
        .chain(COMMON_HASHTAGS.iter().map(|t| t.to_string()))
        .take(MAX_HASHTAGS)
        .collect()
}

#[async_trait]
impl CaptionService for MockCaptionService {
    async fn generate(&self, request: &GenerationRequest) -> Result<CaptionBatch, CaptionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let captions: Vec<GeneratedCaption> = (0..MOCK_VARIANTS)
            .map(|_| GeneratedCaption {
                text: self.caption_text(request),
                hashtags: request
                    .options
                    .include_hashtags
                    .then(|| mock_hashtags(&request.content, &request.options.platform)),
            })
            .collect();

        debug!("Mock backend produced {} captions", captions.len());
        Ok(CaptionBatch {
            captions,
            usage: None,
        })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::style::StyleOptions;

    fn request(content: &str, options: StyleOptions) -> GenerationRequest {
        GenerationRequest {
            content: content.to_string(),
            options,
        }
    }

    #[tokio::test]
    async fn test_mock_returns_three_captions() {
        let service = MockCaptionService::with_seed(7, Duration::ZERO);
        let batch = service
            .generate(&request("a sunset over the ocean", StyleOptions::default()))
            .await
            .unwrap();
        assert_eq!(batch.captions.len(), 3);
        assert!(batch.usage.is_none());
        for caption in &batch.captions {
            assert!(caption
                .text
                .contains("This is a casual caption about a sunset over the ocean for instagram."));
            assert!(caption.hashtags.is_some());
        }
    }

    #[tokio::test]
    async fn test_mock_respects_disabled_flags() {
        let service = MockCaptionService::with_seed(1, Duration::ZERO);
        let options = StyleOptions {
            include_hashtags: false,
            include_emojis: false,
            length: Length::Short,
            ..StyleOptions::default()
        };
        let batch = service.generate(&request("coffee", options)).await.unwrap();
        for caption in &batch.captions {
            assert!(caption.hashtags.is_none());
            assert!(caption.text.starts_with("This is a casual caption"));
            assert!(caption.text.ends_with("Perfect for quick engagement!"));
        }
    }

    #[tokio::test]
    async fn test_mock_emoji_prefix_comes_from_fixed_set() {
        let service = MockCaptionService::with_seed(42, Duration::ZERO);
        let batch = service
            .generate(&request("coffee", StyleOptions::default()))
            .await
            .unwrap();
        for caption in &batch.captions {
            let prefix = caption.text.split(' ').next().unwrap();
            assert!(EMOJIS.contains(&prefix), "unexpected prefix {prefix:?}");
        }
    }

    #[test]
    fn test_mock_hashtags_order_and_cap() {
        let tags = mock_hashtags("Morning Coffee Ritual at home", &Platform::TikTok);
        assert_eq!(tags.len(), MAX_HASHTAGS);
        assert_eq!(
            &tags[..6],
            &["#morning", "#coffee", "#ritual", "#tiktok", "#viral", "#trending"]
        );
        assert_eq!(&tags[6..], &["#socialmedia", "#content"]);
    }

    #[test]
    fn test_mock_hashtags_unknown_platform_skips_platform_tags() {
        let tags = mock_hashtags("bread", &Platform::Other("myspace".to_string()));
        assert_eq!(tags[0], "#bread");
        assert_eq!(tags[1], "#socialmedia");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_for_configured_delay() {
        let service = MockCaptionService::with_seed(3, Duration::from_millis(2000));
        let started = tokio::time::Instant::now();
        service
            .generate(&request("coffee", StyleOptions::default()))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }
}
