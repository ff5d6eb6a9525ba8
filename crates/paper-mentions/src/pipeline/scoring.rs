//! Mention vote scoring.
//!
//! Converts raw engagement signals and textual overlap into one comparable
//! integer. Substantive original commentary gets a bonus large enough to
//! outrank any engagement count, so shallow reshares never crowd out real
//! discussion.

use std::collections::HashSet;

use crate::config::scoring;
use crate::error::{PipelineResult, SourceResult};
use crate::models::{PaperIdentifiers, RawMention, RawProfile};
use crate::pipeline::normalize::normalize;
use crate::source::MentionSource;

/// Outcome of scoring one mention.
#[derive(Debug, Clone)]
pub struct ScoredMention {
    /// Vote score; `None` when vote computation was not requested.
    pub votes: Option<i64>,

    /// The author's current profile image.
    pub profile_image_url: String,
}

/// True when the bio matches any research keyword, case-insensitively.
fn bio_matches_research(bio: &str) -> bool {
    let bio = bio.to_lowercase();
    scoring::RESEARCH_KEYWORDS.iter().any(|kw| bio.contains(kw))
}

/// Compute the vote score for one mention.
///
/// `thread_text` is the ordered body texts of the reconstructed thread, or
/// just the mention's own text when threads are not being unrolled.
#[must_use]
pub fn compute_votes(
    mention: &RawMention,
    thread_text: &[String],
    paper: &PaperIdentifiers,
    profile: &RawProfile,
) -> i64 {
    let mut thread_words: HashSet<String> = HashSet::new();
    for part in thread_text {
        thread_words.extend(normalize(part));
    }

    let mut query_words: HashSet<String> = HashSet::new();
    for identifier in paper.present() {
        query_words.extend(normalize(identifier));
    }
    for url in &mention.urls {
        query_words.extend(normalize(url));
    }

    // Original-content tokens beyond what quoting the paper contributes.
    let comments = thread_words.difference(&query_words).count();

    let too_thin =
        mention.is_reshare || mention.text.chars().count() < scoring::MIN_BODY_CHARS;
    let is_substantive = !too_thin && comments >= scoring::MIN_COMMENT_TOKENS;
    let qualifying_bonus = if is_substantive { scoring::QUALIFYING_BONUS } else { 0 };

    let research_bonus =
        if bio_matches_research(&profile.bio) { scoring::RESEARCH_BONUS } else { 0 };

    mention.like_count + mention.reshare_count + qualifying_bonus + profile.followers + research_bonus
}

/// Scores mentions against a mention source, resolving author profiles.
pub struct Scorer<'a, S> {
    source: &'a S,
}

impl<'a, S: MentionSource> Scorer<'a, S> {
    /// Create a scorer over the given source.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve the author profile, mapping failure to `ProfileLookup`.
    async fn resolve_profile(&self, username: &str) -> PipelineResult<RawProfile> {
        let result: SourceResult<RawProfile> = self.source.lookup_profile(username).await;
        result.map_err(|e| crate::error::PipelineError::profile_lookup(username, e))
    }

    /// Score one mention: resolve the profile and compute full votes.
    ///
    /// Fails with `ProfileLookup` when the author profile cannot be
    /// resolved; no partial score is fabricated.
    pub async fn score(
        &self,
        mention: &RawMention,
        thread_text: &[String],
        paper: &PaperIdentifiers,
    ) -> PipelineResult<ScoredMention> {
        let profile = self.resolve_profile(&mention.username).await?;
        let votes = compute_votes(mention, thread_text, paper, &profile);
        Ok(ScoredMention { votes: Some(votes), profile_image_url: profile.avatar_url })
    }

    /// Resolve only the profile image, skipping vote computation.
    ///
    /// Used for thread-context mentions that are persisted without a score.
    pub async fn profile_image_only(&self, mention: &RawMention) -> PipelineResult<ScoredMention> {
        let profile = self.resolve_profile(&mention.username).await?;
        Ok(ScoredMention { votes: None, profile_image_url: profile.avatar_url })
    }
}
