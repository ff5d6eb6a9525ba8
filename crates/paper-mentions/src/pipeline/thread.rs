//! Thread reconstruction.
//!
//! There is no direct "get replies" capability on the mention source, so a
//! thread is rebuilt from a time-windowed search over the author's activity,
//! filtered to the mention's conversation. Completeness is therefore bounded
//! by the source's windowed search; this is a documented approximation, not
//! a guarantee.

use chrono::{DateTime, Utc};

use crate::config::windows;
use crate::error::PipelineResult;
use crate::models::RawMention;
use crate::source::MentionSource;

/// A reconstructed reply chain, oldest first.
#[derive(Debug, Clone, Default)]
pub struct UnrolledThread {
    /// Full mention records in chronological reading order.
    pub mentions: Vec<RawMention>,

    /// Body texts parallel to `mentions`.
    pub texts: Vec<String>,
}

/// The search window around a mention's timestamp.
///
/// A thread's first mention gets `[t, t+30h]`: threads unfold forward in
/// time from their origin. A mid-thread reply gets the symmetric
/// `[t-10h, t+10h]` since its position in the timeline is unknown.
#[must_use]
pub fn search_window(mention: &RawMention) -> (DateTime<Utc>, DateTime<Utc>) {
    let t = mention.created_at;
    if mention.is_first_in_thread() {
        (t, t + windows::thread_lookahead())
    } else {
        (t - windows::reply_window(), t + windows::reply_window())
    }
}

/// Reconstruct the ordered reply chain containing `mention`.
///
/// Searches the author's activity (`@username`) within the window, keeps
/// only mentions sharing the conversation id, and reverses the source's
/// newest-first order so the output reads oldest first.
pub async fn unroll<S: MentionSource>(
    source: &S,
    mention: &RawMention,
) -> PipelineResult<UnrolledThread> {
    let (since, until) = search_window(mention);
    let query = format!("@{}", mention.username);

    let results = source.search_window(&query, since, until).await?;

    let mut mentions: Vec<RawMention> = results
        .into_iter()
        .filter(|m| m.conversation_id == mention.conversation_id)
        .collect();
    mentions.reverse();

    let texts = mentions.iter().map(|m| m.text.clone()).collect();
    Ok(UnrolledThread { mentions, texts })
}
