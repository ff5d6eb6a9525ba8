//! Mention and profile models: raw source payloads and persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw mention as returned by the mention source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMention {
    /// Source-assigned mention id.
    pub id: String,

    /// Conversation/thread id shared by every mention in a reply chain.
    #[serde(default)]
    pub conversation_id: String,

    /// Author username.
    #[serde(default)]
    pub username: String,

    /// Author user id.
    #[serde(default)]
    pub user_id: String,

    /// Body text.
    #[serde(default)]
    pub text: String,

    /// Attached URLs.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Permalink to the mention.
    #[serde(default)]
    pub link: String,

    /// Whether this mention is a reshare of another.
    #[serde(default)]
    pub is_reshare: bool,

    /// Like count.
    #[serde(default)]
    pub like_count: i64,

    /// Reshare count.
    #[serde(default)]
    pub reshare_count: i64,

    /// Publication timestamp.
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl RawMention {
    /// A mention opens its thread when its id equals the conversation id.
    #[must_use]
    pub fn is_first_in_thread(&self) -> bool {
        self.id == self.conversation_id
    }
}

/// Author profile as resolved from the mention source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    /// Username the profile was looked up by.
    #[serde(default)]
    pub username: String,

    /// Follower count.
    #[serde(default)]
    pub followers: i64,

    /// Profile image URL.
    #[serde(default)]
    pub avatar_url: String,

    /// Free-text bio.
    #[serde(default)]
    pub bio: String,
}

/// Search result wrapper from the mention source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentionSearchResult {
    /// Mentions in this response, newest first.
    #[serde(default)]
    pub data: Vec<RawMention>,
}

/// A persisted mention record.
///
/// `mention_id` is the unique ingestion key: re-ingesting the same source id
/// never creates a second record and never overwrites the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Store-assigned record id.
    pub id: Uuid,

    /// Body text.
    pub mention_text: String,

    /// Source-assigned mention id (unique key).
    pub mention_id: String,

    /// Attached URLs.
    pub urls: Vec<String>,

    /// Permalink.
    pub link: String,

    /// Whether this mention is a reshare.
    pub is_reshare: bool,

    /// Vote score; null for thread-context mentions that were not scored.
    pub votes: Option<i64>,

    /// Publication timestamp.
    pub mention_date: DateTime<Utc>,

    /// Author username.
    pub username: String,

    /// Author user id.
    pub user_id: String,

    /// Author profile image at ingestion time.
    pub profile_image_url: String,

    /// When this record was written.
    pub date_updated: DateTime<Utc>,

    /// True when this mention matched the original identifier query,
    /// false for mentions pulled in only as thread context.
    pub is_queried_mention: bool,

    /// Conversation/thread id.
    pub conversation_id: String,

    /// The paper this mention refers to.
    pub paper: Uuid,
}

impl MentionRecord {
    /// Build a record from a raw mention and its resolved profile image.
    #[must_use]
    pub fn from_raw(
        raw: &RawMention,
        profile_image_url: String,
        votes: Option<i64>,
        is_queried_mention: bool,
        paper: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mention_text: raw.text.clone(),
            mention_id: raw.id.clone(),
            urls: raw.urls.clone(),
            link: raw.link.clone(),
            is_reshare: raw.is_reshare,
            votes,
            mention_date: raw.created_at,
            username: raw.username.clone(),
            user_id: raw.user_id.clone(),
            profile_image_url,
            date_updated: now,
            is_queried_mention,
            conversation_id: raw.conversation_id.clone(),
            paper,
        }
    }
}

/// One entry in the aggregated "top mentions" view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMentionRecord {
    /// Store-assigned record id.
    pub id: Uuid,

    /// The underlying mention record.
    pub mention: Uuid,

    /// Aggregation pass timestamp.
    pub date_updated: DateTime<Utc>,

    /// The top-paper entry this mention was attributed to.
    pub paper: Uuid,
}

impl TopMentionRecord {
    /// Link a mention to a top-paper entry at aggregation time.
    #[must_use]
    pub fn new(mention: Uuid, paper: Uuid, now: DateTime<Utc>) -> Self {
        Self { id: Uuid::new_v4(), mention, date_updated: now, paper }
    }
}
