//! Output formatting for operator-facing CLI summaries.

mod markdown;

pub use markdown::format_top_papers_markdown;
