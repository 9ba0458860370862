// Prompt constants and sampling parameters for caption generation.

/// System message framing the model as a caption writer.
pub const CAPTION_SYSTEM: &str =
    "You are a social media expert that creates engaging captions for different platforms.";

pub const HASHTAG_INSTRUCTION: &str = "Include relevant hashtags (3-5 hashtags)";

pub const EMOJI_INSTRUCTION: &str = "Include appropriate emojis";

pub const ENGAGEMENT_INSTRUCTION: &str =
    "Generate an engaging caption that would encourage likes, comments, and shares.";

/// Token budget per completion.
pub const CAPTION_MAX_TOKENS: u32 = 300;

/// Sampling temperature. Kept high for varied phrasing across variants.
pub const CAPTION_TEMPERATURE: f32 = 0.8;

/// Completions requested per call. Callers get up to this many variants.
pub const CAPTION_VARIANTS: u32 = 3;
