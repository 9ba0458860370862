//! Caption Session — form inputs plus the most recent batch of generated captions.
//!
//! A session is a plain value. Generation is split in two so the owner can release the
//! session while the backend works: `begin_generation` validates, marks the session as
//! loading and hands out a ticket; `complete_generation` settles that ticket.
//! `SessionHandle::generate` / `regenerate` drive both halves around the backend call.
//!
//! At most one generation is pending at a time; a second `begin_generation` is `Busy`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::captions::error::{CaptionError, ServiceError};
use crate::captions::service::{GeneratedCaption, GenerationRequest, MAX_HASHTAGS};
use crate::captions::style::{Length, Platform, StyleOptions, Tone};

/// One generated caption, tagged with the style it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub text: String,
    /// Present only when hashtags were requested at generation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    pub is_favorite: bool,
    pub platform: Platform,
    pub tone: Tone,
    pub length: Length,
}

impl Caption {
    fn from_generated(generated: GeneratedCaption, options: &StyleOptions) -> Self {
        let hashtags = if options.include_hashtags {
            let mut tags = generated.hashtags.unwrap_or_default();
            tags.truncate(MAX_HASHTAGS);
            Some(tags)
        } else {
            None
        };

        Self {
            text: generated.text,
            hashtags,
            is_favorite: false,
            platform: options.platform.clone(),
            tone: options.tone.clone(),
            length: options.length.clone(),
        }
    }
}

/// Whether `begin_generation` should insist on non-blank content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCheck {
    Required,
    /// Regeneration assumes an earlier generate already validated the content.
    Skip,
}

/// Proof that a generation was started, carrying the request snapshot to send.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    seq: u64,
    request: GenerationRequest,
}

impl GenerationTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptionSession {
    content: String,
    options: StyleOptions,
    captions: Vec<Caption>,
    is_loading: bool,
    last_seq: u64,
    pending: Option<u64>,
}

impl CaptionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.options.platform = platform;
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.options.tone = tone;
    }

    pub fn set_length(&mut self, length: Length) {
        self.options.length = length;
    }

    pub fn set_include_hashtags(&mut self, include: bool) {
        self.options.include_hashtags = include;
    }

    pub fn set_include_emojis(&mut self, include: bool) {
        self.options.include_emojis = include;
    }

    /// Marks a generation as pending and snapshots the request to send.
    ///
    /// Nothing is mutated when this fails.
    pub fn begin_generation(
        &mut self,
        check: ContentCheck,
    ) -> Result<GenerationTicket, CaptionError> {
        if check == ContentCheck::Required && self.content.trim().is_empty() {
            return Err(CaptionError::Validation("Content is required".to_string()));
        }
        if self.is_loading {
            return Err(CaptionError::Busy);
        }

        self.last_seq += 1;
        self.pending = Some(self.last_seq);
        self.is_loading = true;

        Ok(GenerationTicket {
            seq: self.last_seq,
            request: GenerationRequest {
                content: self.content.clone(),
                options: self.options.clone(),
            },
        })
    }

    /// Settles the generation started by `ticket`.
    ///
    /// Success replaces the caption list wholesale; failure keeps it. A batch with no
    /// non-blank text counts as a failure. A ticket that is no longer pending (it was
    /// abandoned) never touches the captions. Clearing does not abandon the ticket, so a
    /// batch that lands after `clear` still fills the list.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<Vec<GeneratedCaption>, CaptionError>,
    ) -> Result<&[Caption], CaptionError> {
        let current = self.pending == Some(ticket.seq);
        if current {
            self.pending = None;
            self.is_loading = false;
        }

        let generated = outcome?;

        if !current {
            warn!(
                "Discarding {} captions from stale generation #{}",
                generated.len(),
                ticket.seq
            );
            return Ok(&self.captions);
        }

        let captions: Vec<Caption> = generated
            .into_iter()
            .filter(|g| !g.text.trim().is_empty())
            .map(|g| Caption::from_generated(g, &ticket.request.options))
            .collect();

        if captions.is_empty() {
            warn!("Generation #{} produced only blank captions", ticket.seq);
            return Err(ServiceError::new(
                "The caption service returned no usable captions. Please try again.",
            )
            .into());
        }

        self.captions = captions;

        debug!(
            "Generation #{} stored {} captions",
            ticket.seq,
            self.captions.len()
        );

        Ok(&self.captions)
    }

    /// Drops the pending generation `seq`, if it is still the pending one.
    /// Its eventual result will be discarded by `complete_generation`.
    pub fn abandon_generation(&mut self, seq: u64) {
        if self.pending == Some(seq) {
            self.pending = None;
            self.is_loading = false;
        }
    }

    pub fn toggle_favorite(&mut self, index: usize) -> Result<&Caption, CaptionError> {
        let len = self.captions.len();
        let caption = self
            .captions
            .get_mut(index)
            .ok_or(CaptionError::Index { index, len })?;
        caption.is_favorite = !caption.is_favorite;
        Ok(caption)
    }

    /// Exact stored text of the caption at `index`, for the caller's clipboard or export.
    pub fn copy_text(&self, index: usize) -> Result<&str, CaptionError> {
        self.captions
            .get(index)
            .map(|c| c.text.as_str())
            .ok_or(CaptionError::Index {
                index,
                len: self.captions.len(),
            })
    }

    /// Empties the caption list. Content and options are kept.
    pub fn clear(&mut self) {
        self.captions.clear();
    }
}
